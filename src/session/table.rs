use crate::models::ImageRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Session-wide image lookup keyed by game id.
///
/// Cloning hands out another handle to the same table. The table only grows
/// and [`ImageTable::merge`] is its only writer.
#[derive(Debug, Clone, Default)]
pub struct ImageTable {
    records: Arc<RwLock<HashMap<String, ImageRecord>>>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union a batch into the table. Repeated keys are overwritten, except a
    /// record without an image never replaces one that has an image.
    /// Returns how many entries were written.
    pub fn merge(&self, batch: HashMap<String, ImageRecord>) -> usize {
        let mut records = self.records.write();
        let mut written = 0;
        for (game_id, record) in batch {
            let keep_existing = !record.has_image()
                && records.get(&game_id).is_some_and(ImageRecord::has_image);
            if keep_existing {
                continue;
            }
            records.insert(game_id, record);
            written += 1;
        }
        written
    }

    pub fn lookup(&self, game_id: &str) -> Option<ImageRecord> {
        self.records.read().get(game_id).cloned()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> HashMap<String, ImageRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
