use crate::models::{ImageRecord, Listing};
use crate::session::table::ImageTable;
use crate::sources::DealsSource;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Best-effort fetch of high resolution thumbnails for a set of listings.
///
/// Nothing here reaches the user's error state: failed lookups are logged
/// and the affected listings keep their own thumbnail.
pub struct ImageEnricher<S: ?Sized> {
    source: Arc<S>,
    table: ImageTable,
}

impl<S: DealsSource + ?Sized> ImageEnricher<S> {
    pub fn new(source: Arc<S>, table: ImageTable) -> Self {
        Self { source, table }
    }

    /// Look up every distinct game once, concurrently, and merge whatever
    /// succeeded into the table. Returns the number of records written.
    pub async fn enrich(&self, listings: &[Listing]) -> usize {
        let game_ids = distinct_game_ids(listings);
        if game_ids.is_empty() {
            return 0;
        }

        debug!(
            listings = listings.len(),
            games = game_ids.len(),
            source = self.source.source_name(),
            "Fetching game images"
        );

        let lookups = game_ids.into_iter().map(|game_id| async move {
            let result = self.source.fetch_game_thumb(game_id).await;
            (game_id, result)
        });

        let mut batch = HashMap::new();
        let mut failed = 0usize;
        for (game_id, result) in join_all(lookups).await {
            match result {
                Ok(thumb) => {
                    batch.insert(game_id.to_string(), ImageRecord::new(thumb));
                }
                Err(e) => {
                    failed += 1;
                    warn!(game_id = game_id, error = %e, "Game image lookup failed");
                }
            }
        }

        let written = self.table.merge(batch);
        info!(written = written, failed = failed, "Merged game images");
        written
    }
}

/// Distinct game ids in first-seen order
pub fn distinct_game_ids(listings: &[Listing]) -> Vec<&str> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .map(|listing| listing.game_id.as_str())
        .filter(|game_id| seen.insert(*game_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::stub::{listing, DealsReply, GameReply, StubSource};
    use std::time::Duration;

    fn listings(game_ids: &[&str]) -> Vec<Listing> {
        game_ids
            .iter()
            .enumerate()
            .map(|(i, game_id)| listing(&i.to_string(), game_id, "low.png"))
            .collect()
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let listings = listings(&["A", "A", "B", "A", "B"]);
        assert_eq!(distinct_game_ids(&listings), ["A", "B"]);
    }

    #[tokio::test]
    async fn one_request_per_distinct_game() {
        let source = Arc::new(
            StubSource::new(DealsReply::Listings(Vec::new()))
                .with_game("A", GameReply::Thumb(Some("a.png".into())))
                .with_game("B", GameReply::Thumb(Some("b.png".into()))),
        );
        let table = ImageTable::new();
        let enricher = ImageEnricher::new(source.clone(), table.clone());

        let written = enricher.enrich(&listings(&["A", "A", "B", "A", "B"])).await;

        let mut requested = source.game_requests.lock().clone();
        requested.sort();
        assert_eq!(requested, ["A", "B"]);
        assert_eq!(written, 2);
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn partial_failure_keeps_successful_lookups() {
        let source = Arc::new(
            StubSource::new(DealsReply::Listings(Vec::new()))
                .with_game("A", GameReply::Fail)
                .with_game("B", GameReply::Thumb(Some("b.png".into()))),
        );
        let table = ImageTable::new();

        ImageEnricher::new(source, table.clone())
            .enrich(&listings(&["A", "B"]))
            .await;

        assert!(table.lookup("A").is_none());
        assert_eq!(table.lookup("B").unwrap().high_res_thumb.as_deref(), Some("b.png"));
    }

    #[tokio::test]
    async fn game_without_image_is_recorded_as_such() {
        let source = Arc::new(
            StubSource::new(DealsReply::Listings(Vec::new()))
                .with_game("A", GameReply::Thumb(None)),
        );
        let table = ImageTable::new();

        ImageEnricher::new(source, table.clone())
            .enrich(&listings(&["A"]))
            .await;

        assert_eq!(table.lookup("A"), Some(ImageRecord::default()));
    }

    #[tokio::test]
    async fn arrival_order_does_not_change_result() {
        let build = |slow: &str| {
            let fast = if slow == "A" { "B" } else { "A" };
            StubSource::new(DealsReply::Listings(Vec::new()))
                .with_slow_game(
                    slow,
                    GameReply::Thumb(Some(format!("{}.png", slow))),
                    Duration::from_millis(30),
                )
                .with_game(fast, GameReply::Thumb(Some(format!("{}.png", fast))))
        };

        let first = ImageTable::new();
        ImageEnricher::new(Arc::new(build("A")), first.clone())
            .enrich(&listings(&["A", "B"]))
            .await;

        let second = ImageTable::new();
        ImageEnricher::new(Arc::new(build("B")), second.clone())
            .enrich(&listings(&["A", "B"]))
            .await;

        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[tokio::test]
    async fn lookups_run_concurrently() {
        let delay = Duration::from_millis(300);
        let source = Arc::new(
            StubSource::new(DealsReply::Listings(Vec::new()))
                .with_slow_game("A", GameReply::Thumb(Some("a.png".into())), delay)
                .with_slow_game("B", GameReply::Thumb(Some("b.png".into())), delay),
        );
        let table = ImageTable::new();

        let started = tokio::time::Instant::now();
        let written = ImageEnricher::new(source, table.clone())
            .enrich(&listings(&["A", "B"]))
            .await;
        let elapsed = started.elapsed();

        assert_eq!(written, 2);
        assert!(elapsed < Duration::from_millis(550), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn nothing_to_do_for_empty_listings() {
        let source = Arc::new(StubSource::new(DealsReply::Listings(Vec::new())));
        let written = ImageEnricher::new(source.clone(), ImageTable::new())
            .enrich(&[])
            .await;

        assert_eq!(written, 0);
        assert!(source.game_requests.lock().is_empty());
    }
}
