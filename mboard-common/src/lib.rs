//! # Missionary Board Common Library
//!
//! Shared code for the missionary board crates including:
//! - Error types
//! - Configuration loading and instance folder resolution
//! - SQLite key/value settings store

pub mod config;
pub mod db;
pub mod error;

pub use config::SyncConfig;
pub use error::{Error, Result};
