use clap::Parser;
use deal_scout::sources::types::DEFAULT_BASE_URL;
use deal_scout::ClientConfig;

#[derive(Parser)]
#[command(name = "deal-scout")]
#[command(author, version, about = "Search current Steam game deals")]
pub struct Cli {
    /// Game title to search for (omit to enter titles interactively)
    pub title: Option<String>,

    /// API root to query
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Store to restrict deals to
    #[arg(long, default_value = "1")]
    pub store_id: u32,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Check that each image loads, falling back to a placeholder
    #[arg(long)]
    pub verify_images: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            store_id: self.store_id,
            timeout_secs: self.timeout_secs,
            ..ClientConfig::default()
        }
    }
}
