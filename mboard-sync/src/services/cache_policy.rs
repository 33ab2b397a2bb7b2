//! Roster cache freshness

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Decides whether the cached roster is old enough for a full sync
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    refresh_interval: Duration,
}

impl CachePolicy {
    pub fn new(refresh_interval: Duration) -> Self {
        Self { refresh_interval }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Full sync required iff more than the refresh interval has passed
    /// since the last successful sync. Never synced means due.
    pub fn is_due(&self, last_success: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let Some(last_success) = last_success else {
            return true;
        };
        match (now - last_success).to_std() {
            Ok(elapsed) => elapsed > self.refresh_interval,
            // Last sync is in the future (clock moved back): not due
            Err(_) => false,
        }
    }
}
