use crate::error::SearchError;
use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Outbound lookups the search pipeline depends on.
/// The session only talks to this trait, so tests can swap in a stub.
#[async_trait]
pub trait DealsSource: Send + Sync {
    /// Primary lookup: listings matching a title, in server order
    async fn fetch_deals(&self, title: &str) -> Result<Vec<Listing>, SearchError>;

    /// High resolution thumbnail for one game, `None` when the source has none
    async fn fetch_game_thumb(&self, game_id: &str) -> Result<Option<String>>;

    /// Whether an image URL actually loads
    async fn image_loads(&self, _url: &str) -> bool {
        true
    }

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
