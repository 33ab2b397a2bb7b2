//! Cached roster database operations
//!
//! Three independent keys in the settings table:
//! - `missionaries`: the sorted slide list, always replaced as a whole
//! - `last_refresh`: time of the last successful full sync
//! - `refresh_error`: message from the last failed sync, absent when healthy

use crate::models::Missionary;
use chrono::{DateTime, Utc};
use mboard_common::db::{delete_setting, get_json_setting, set_json_setting};
use mboard_common::Result;
use sqlx::{Pool, Sqlite};

pub const MISSIONARIES_KEY: &str = "missionaries";
pub const LAST_REFRESH_KEY: &str = "last_refresh";
pub const REFRESH_ERROR_KEY: &str = "refresh_error";

/// Load the cached roster. A missing key is an empty roster.
pub async fn load_missionaries(db: &Pool<Sqlite>) -> Result<Vec<Missionary>> {
    get_json_setting(db, MISSIONARIES_KEY)
        .await
        .map(|opt| opt.unwrap_or_default())
}

/// Replace the cached roster
pub async fn save_missionaries(db: &Pool<Sqlite>, missionaries: &[Missionary]) -> Result<()> {
    set_json_setting(db, MISSIONARIES_KEY, missionaries).await
}

pub async fn load_last_refresh(db: &Pool<Sqlite>) -> Result<Option<DateTime<Utc>>> {
    get_json_setting(db, LAST_REFRESH_KEY).await
}

pub async fn save_last_refresh(db: &Pool<Sqlite>, at: DateTime<Utc>) -> Result<()> {
    set_json_setting(db, LAST_REFRESH_KEY, &at).await
}

pub async fn load_refresh_error(db: &Pool<Sqlite>) -> Result<Option<String>> {
    get_json_setting(db, REFRESH_ERROR_KEY).await
}

pub async fn save_refresh_error(db: &Pool<Sqlite>, error: &str) -> Result<()> {
    set_json_setting(db, REFRESH_ERROR_KEY, error).await
}

pub async fn clear_refresh_error(db: &Pool<Sqlite>) -> Result<()> {
    delete_setting(db, REFRESH_ERROR_KEY).await
}

/// Forget the cached roster, sync time and error
///
/// Used when the roster credentials change so the next refresh starts over.
pub async fn clear_all(db: &Pool<Sqlite>) -> Result<()> {
    delete_setting(db, MISSIONARIES_KEY).await?;
    delete_setting(db, LAST_REFRESH_KEY).await?;
    delete_setting(db, REFRESH_ERROR_KEY).await
}
