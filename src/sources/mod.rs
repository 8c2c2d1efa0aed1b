pub mod cheapshark;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

pub use cheapshark::CheapSharkClient;
pub use traits::DealsSource;
pub use types::ClientConfig;
