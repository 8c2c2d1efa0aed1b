//! Text rendering of a session for the terminal front end.

use crate::models::Listing;
use crate::session::{SearchState, View};
use serde::Serialize;

/// Shown when a listing's image fails to load
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/120x45/3a3442/7a918d?text=No+Image";

/// Image currently displayed for one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSlot {
    url: String,
    failed: bool,
}

impl ImageSlot {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            failed: false,
        }
    }

    /// Load failure reported by the display surface: swap in the placeholder.
    /// Only the first failure has any effect.
    pub fn on_load_error(&mut self) {
        if !self.failed {
            self.failed = true;
            self.url = PLACEHOLDER_IMAGE.to_string();
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_placeholder(&self) -> bool {
        self.failed
    }
}

/// One listing as the front end shows it
#[derive(Debug, Clone, Serialize)]
pub struct Card<'a> {
    pub title: &'a str,
    pub sale_price: &'a str,
    pub normal_price: &'a str,
    pub savings_percent: Option<i64>,
    pub image: ImageSlot,
    pub deal_url: String,
}

impl<'a> Card<'a> {
    pub fn new(listing: &'a Listing, image: ImageSlot) -> Self {
        Self {
            title: &listing.title,
            sale_price: &listing.sale_price,
            normal_price: &listing.normal_price,
            savings_percent: listing.savings_percent(),
            image,
            deal_url: listing.deal_url(),
        }
    }
}

pub fn render_card(index: usize, card: &Card<'_>) -> String {
    let savings = card
        .savings_percent
        .map(|s| s.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{}. {}\n   Sale Price: ${}  Normal Price: ${}  Savings: {}%\n   Image: {}\n   Deal: {}",
        index + 1,
        card.title,
        card.sale_price,
        card.normal_price,
        savings,
        card.image.url(),
        card.deal_url
    )
}

/// Banner for the non-listing states, `None` when there are results to show
pub fn render_view(state: &SearchState) -> Option<String> {
    match state.view() {
        View::Idle => None,
        View::Loading => Some("Loading deals...".to_string()),
        View::Failed(message) => Some(format!("Error: {}", message)),
        View::NoResults(title) => Some(format!("No deals found for \"{}\"", title)),
        View::Results(_) => None,
    }
}
