use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.cheapshark.com/api";

/// Connection settings for the deals API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, the `/1.0/...` paths are appended to it
    pub base_url: String,
    /// Store filter for the deals query (1 = Steam)
    pub store_id: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            store_id: 1,
            timeout_secs: 30,
            user_agent: concat!("deal-scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
