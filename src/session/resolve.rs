use crate::models::Listing;
use crate::session::table::ImageTable;

/// Best image for a listing: the table's high resolution thumbnail when it
/// has a non-empty one, otherwise the listing's own thumbnail.
pub fn resolve_image(table: &ImageTable, listing: &Listing) -> String {
    table
        .lookup(&listing.game_id)
        .and_then(|record| record.high_res_thumb)
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| listing.thumb.clone())
}
