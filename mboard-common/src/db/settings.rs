//! Settings database access
//!
//! Read/write values in the `settings` table (key-value store). Values are
//! stored as JSON text so structured data (lists, timestamps) survives a
//! round trip through SQLite.

use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{Pool, Sqlite};

/// Get the raw stored text for a key
///
/// Returns None if the key doesn't exist or holds NULL.
pub async fn get_raw_setting(db: &Pool<Sqlite>, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(db)
            .await?;

    Ok(value.flatten())
}

/// Generic JSON setting getter
///
/// Returns None if key doesn't exist in database.
/// Returns `Error::Serialization` if the stored text is not valid JSON for `T`.
pub async fn get_json_setting<T: DeserializeOwned>(
    db: &Pool<Sqlite>,
    key: &str,
) -> Result<Option<T>> {
    match get_raw_setting(db, key).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Generic JSON setting setter
///
/// Inserts or replaces the whole value for `key`.
pub async fn set_json_setting<T: Serialize + ?Sized>(
    db: &Pool<Sqlite>,
    key: &str,
    value: &T,
) -> Result<()> {
    let value_str = serde_json::to_string(value)?;

    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value_str)
    .execute(db)
    .await?;

    Ok(())
}

/// Remove a key. Removing a missing key is not an error.
pub async fn delete_setting(db: &Pool<Sqlite>, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(db)
        .await?;

    Ok(())
}
