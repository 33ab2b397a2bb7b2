//! Base traits and types shared by the engine services

use crate::error::RosterError;
use crate::models::RawRecord;
use async_trait::async_trait;

/// Source of raw roster records
///
/// Implemented by the church website client. Tests substitute in-memory
/// sources.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Source identifier for logging (e.g., "LCR")
    fn source_id(&self) -> &'static str;

    /// Fetch every roster record for the configured unit
    ///
    /// # Errors
    /// Returns `RosterError` for transport, authorization, HTTP status or
    /// decoding failures. The caller keeps serving the cached roster.
    async fn fetch_roster(&self) -> Result<Vec<RawRecord>, RosterError>;
}

/// What a call to `refresh()` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cache was fresh; only photo associations were recomputed
    PhotosOnly,
    /// Full sync stored `count` slides
    Synced { count: usize },
    /// Full sync failed; the previous roster is still cached
    Failed,
    /// Another refresh was already running in this process
    Skipped,
}
