//! Paged reads of the cached roster
//!
//! Only the settings database is read here, never the roster source, so page
//! renders are not slowed down by a refresh. Storage problems degrade to an
//! empty page instead of failing the render.

use crate::db::roster;
use crate::models::Missionary;
use sqlx::{Pool, Sqlite};
use tracing::warn;

/// List a page of the cached roster
///
/// Returns the slides `[offset, offset + limit)` and the offset of the next
/// page. The next offset wraps to 0 once the end of the roster is reached,
/// which tells the slideshow to start over.
pub async fn list_range(db: &Pool<Sqlite>, offset: usize, limit: usize) -> (Vec<Missionary>, usize) {
    list_range_filtered(db, offset, limit, |_| true).await
}

/// List a page of the cached roster after applying `filter`
pub async fn list_range_filtered<F>(
    db: &Pool<Sqlite>,
    offset: usize,
    limit: usize,
    filter: F,
) -> (Vec<Missionary>, usize)
where
    F: Fn(&Missionary) -> bool,
{
    let missionaries = match roster::load_missionaries(db).await {
        Ok(missionaries) => missionaries,
        Err(e) => {
            warn!("Cached roster unreadable, listing nothing: {}", e);
            return (Vec::new(), 0);
        }
    };
    let filtered: Vec<Missionary> = missionaries.into_iter().filter(|m| filter(m)).collect();
    page_of(filtered, offset, limit)
}

/// Error from the last refresh, or an empty string when healthy
pub async fn get_refresh_error(db: &Pool<Sqlite>) -> String {
    match roster::load_refresh_error(db).await {
        Ok(error) => error.unwrap_or_default(),
        Err(e) => {
            warn!("Stored refresh error unreadable: {}", e);
            String::new()
        }
    }
}

fn page_of(missionaries: Vec<Missionary>, offset: usize, limit: usize) -> (Vec<Missionary>, usize) {
    let end = offset.saturating_add(limit);
    let next_offset = if end < missionaries.len() { end } else { 0 };
    let page = missionaries
        .into_iter()
        .skip(offset)
        .take(limit)
        .collect();
    (page, next_offset)
}
