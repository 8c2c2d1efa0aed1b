use serde::{Deserialize, Serialize};

/// Base of the outbound purchase link for a deal
pub const REDIRECT_URL: &str = "https://www.cheapshark.com/redirect";

/// One discount record as returned by the deals endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub title: String,
    #[serde(rename = "salePrice")]
    pub sale_price: String,
    #[serde(rename = "normalPrice")]
    pub normal_price: String,
    pub savings: String,
    /// Unique per listing
    #[serde(rename = "dealID")]
    pub deal_id: String,
    /// Low resolution thumbnail, always present on the primary result
    pub thumb: String,
    /// Shared by every listing of the same underlying game
    #[serde(rename = "gameID")]
    pub game_id: String,
}

impl Listing {
    /// Savings rounded to a whole percent, `None` if the payload isn't a number.
    ///
    /// Ties round away from zero and the whole string must parse, so `"50.0x"`
    /// is `None` rather than 50. The API only sends non-negative plain
    /// decimals, where this matches rounding half up.
    pub fn savings_percent(&self) -> Option<i64> {
        self.savings
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .map(|s| s.round() as i64)
    }

    /// Link that opens the deal on the store
    pub fn deal_url(&self) -> String {
        format!("{}?dealID={}", REDIRECT_URL, self.deal_id)
    }
}

/// Supplementary image metadata for one game
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub high_res_thumb: Option<String>,
}

impl ImageRecord {
    pub fn new(high_res_thumb: Option<String>) -> Self {
        Self {
            high_res_thumb: high_res_thumb.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn has_image(&self) -> bool {
        self.high_res_thumb.is_some()
    }
}
