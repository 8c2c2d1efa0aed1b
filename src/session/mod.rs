//! One interactive search session: the deals query state machine, the
//! background image enrichment it triggers, and the shared image table.

pub mod enricher;
pub mod resolve;
pub mod state;
pub mod table;

pub use enricher::ImageEnricher;
pub use resolve::resolve_image;
pub use state::{SearchState, View};
pub use table::ImageTable;

use crate::models::Listing;
use crate::sources::DealsSource;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct DealSession<S> {
    source: Arc<S>,
    state: Mutex<SearchState>,
    images: ImageTable,
}

impl<S: DealsSource + 'static> DealSession<S> {
    pub fn new(source: S) -> Self {
        Self::with_source(Arc::new(source))
    }

    pub fn with_source(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(SearchState::new()),
            images: ImageTable::new(),
        }
    }

    /// Submit a search.
    ///
    /// Blank titles are ignored entirely. Otherwise the state goes to loading,
    /// exactly one deals request is issued, and its outcome replaces the
    /// listings or sets the error. A non-empty result starts image enrichment
    /// in the background; the returned handle resolves with the number of
    /// image records written, and nothing in the session waits on it.
    ///
    /// Overlapping calls are not fenced: whichever response lands last wins.
    pub async fn search(&self, title: &str) -> Option<JoinHandle<usize>> {
        if title.trim().is_empty() {
            debug!("Ignoring blank search");
            return None;
        }

        self.state.lock().begin(title);

        match self.source.fetch_deals(title).await {
            Ok(listings) => {
                info!(title = title, count = listings.len(), "Search finished");
                let enrichment = (!listings.is_empty()).then(|| listings.clone());
                self.state.lock().succeed(listings);
                enrichment.map(|listings| self.spawn_enrichment(listings))
            }
            Err(e) => {
                warn!(title = title, error = %e, "Search failed");
                self.state.lock().fail(e.user_message());
                None
            }
        }
    }

    fn spawn_enrichment(&self, listings: Vec<Listing>) -> JoinHandle<usize> {
        let enricher = ImageEnricher::new(Arc::clone(&self.source), self.images.clone());
        tokio::spawn(async move { enricher.enrich(&listings).await })
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> SearchState {
        self.state.lock().clone()
    }

    pub fn images(&self) -> &ImageTable {
        &self.images
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn resolve_image(&self, listing: &Listing) -> String {
        resolve_image(&self.images, listing)
    }
}
