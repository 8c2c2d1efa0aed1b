pub mod error;
pub mod models;
pub mod presenter;
pub mod session;
pub mod sources;

pub use error::SearchError;
pub use models::{ImageRecord, Listing};
pub use session::DealSession;
pub use sources::{CheapSharkClient, ClientConfig, DealsSource};
