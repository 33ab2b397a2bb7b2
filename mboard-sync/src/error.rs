//! Error types for the sync engine
//!
//! Sync failures never reach page renders. The orchestrator converts them to
//! a `"{kind}: {message}"` string that is stored for the admin page.

use thiserror::Error;

/// Roster source errors
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("credentials rejected by roster source (HTTP 401)")]
    Unauthorized,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl RosterError {
    /// Stable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            RosterError::Network(_) => "NetworkError",
            RosterError::Unauthorized => "Unauthorized",
            RosterError::Api(..) => "ApiError",
            RosterError::Parse(_) => "ParseError",
        }
    }
}

/// Failure of a full sync cycle
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Store(#[from] mboard_common::Error),

    /// A dates-serving string that is not `"Mon YYYY - Mon YYYY"` reached the
    /// couple comparison. Normalized records only ever produce that form or
    /// an empty string.
    #[error("malformed dates serving range {0:?}")]
    MalformedDateRange(String),
}

impl SyncError {
    /// Stable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Roster(e) => e.kind(),
            SyncError::Store(_) => "StoreError",
            SyncError::MalformedDateRange(_) => "MalformedDateRange",
        }
    }

    /// Text persisted as the current refresh error
    pub fn display_for_admin(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}
