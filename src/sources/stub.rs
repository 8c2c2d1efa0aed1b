//! In-memory `DealsSource` used by the unit tests.

use crate::error::SearchError;
use crate::models::Listing;
use crate::sources::traits::DealsSource;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

pub enum DealsReply {
    Listings(Vec<Listing>),
    Status(u16),
    Malformed,
}

#[derive(Clone)]
pub enum GameReply {
    Thumb(Option<String>),
    Fail,
}

pub struct StubSource {
    deals: Mutex<DealsReply>,
    games: HashMap<String, (GameReply, Duration)>,
    broken_images: Vec<String>,
    pub deal_requests: Mutex<Vec<String>>,
    pub game_requests: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new(deals: DealsReply) -> Self {
        Self {
            deals: Mutex::new(deals),
            games: HashMap::new(),
            broken_images: Vec::new(),
            deal_requests: Mutex::new(Vec::new()),
            game_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_game(self, game_id: &str, reply: GameReply) -> Self {
        self.with_slow_game(game_id, reply, Duration::ZERO)
    }

    pub fn with_slow_game(mut self, game_id: &str, reply: GameReply, delay: Duration) -> Self {
        self.games.insert(game_id.to_string(), (reply, delay));
        self
    }

    pub fn with_broken_image(mut self, url: &str) -> Self {
        self.broken_images.push(url.to_string());
        self
    }

    pub fn set_deals(&self, deals: DealsReply) {
        *self.deals.lock() = deals;
    }
}

pub fn listing(deal_id: &str, game_id: &str, thumb: &str) -> Listing {
    Listing {
        title: format!("Game {}", game_id),
        sale_price: "4.99".to_string(),
        normal_price: "9.99".to_string(),
        savings: "50.050050".to_string(),
        deal_id: deal_id.to_string(),
        thumb: thumb.to_string(),
        game_id: game_id.to_string(),
    }
}

#[async_trait]
impl DealsSource for StubSource {
    async fn fetch_deals(&self, title: &str) -> Result<Vec<Listing>, SearchError> {
        self.deal_requests.lock().push(title.to_string());
        match &*self.deals.lock() {
            DealsReply::Listings(listings) => Ok(listings.clone()),
            DealsReply::Status(code) => Err(SearchError::Network {
                status: Some(*code),
                source: None,
            }),
            DealsReply::Malformed => Err(serde_json::from_str::<Vec<Listing>>("{\"oops\":")
                .unwrap_err()
                .into()),
        }
    }

    async fn fetch_game_thumb(&self, game_id: &str) -> Result<Option<String>> {
        self.game_requests.lock().push(game_id.to_string());
        let (reply, delay) = self
            .games
            .get(game_id)
            .cloned()
            .unwrap_or((GameReply::Thumb(None), Duration::ZERO));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            GameReply::Thumb(thumb) => Ok(thumb),
            GameReply::Fail => anyhow::bail!("lookup for {} failed", game_id),
        }
    }

    async fn image_loads(&self, url: &str) -> bool {
        !self.broken_images.iter().any(|broken| broken == url)
    }

    fn source_name(&self) -> &'static str {
        "Stub"
    }
}
