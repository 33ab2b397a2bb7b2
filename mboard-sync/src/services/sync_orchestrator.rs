//! Roster sync orchestrator
//!
//! # Refresh cycle
//! Each call to [`SyncOrchestrator::refresh`] does one of two things:
//!
//! - **Not due** (last successful sync within the refresh interval): look up
//!   photos again for the cached slides and store them. No network call, and
//!   the sync time and error state are left alone.
//! - **Due**: FETCH → NORMALIZE (+ extra records) → MERGE COUPLES → PHOTOS →
//!   SORT → STORE, then clear the error and stamp the sync time.
//!
//! A failed sync stores `"{kind}: {message}"` as the refresh error and keeps
//! the previous roster and sync time, so the board keeps showing stale data
//! and the next page view after the interval retries. Nothing is returned to
//! the caller as an error.

use crate::db::roster;
use crate::error::SyncError;
use crate::models::{Missionary, RawRecord};
use crate::services::cache_policy::CachePolicy;
use crate::services::couple_merger::merge_couples;
use crate::services::extra_records::load_extra_records;
use crate::services::normalizer::Normalizer;
use crate::services::photo_locator::{PhotoLocator, PhotoUrls};
use crate::types::{RefreshOutcome, RosterSource};
use chrono::Utc;
use mboard_common::SyncConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Roster sync orchestrator service
pub struct SyncOrchestrator {
    db: SqlitePool,
    config: SyncConfig,
    source: Arc<dyn RosterSource>,
    photo_locator: PhotoLocator,
    photo_urls: PhotoUrls,
    cache_policy: CachePolicy,
    /// Held for the duration of a refresh so overlapping page views don't
    /// both hit the roster source
    in_flight: Mutex<()>,
}

impl SyncOrchestrator {
    /// Create new sync orchestrator
    ///
    /// # Arguments
    /// * `db` - Settings database holding the cached roster
    /// * `config` - Instance folder, refresh interval and URL settings
    /// * `source` - Roster source queried on a full sync
    pub fn new(db: SqlitePool, config: SyncConfig, source: Arc<dyn RosterSource>) -> Self {
        let photo_locator = PhotoLocator::new(config.photos_dir());
        let photo_urls = PhotoUrls::from_config(&config);
        let cache_policy = CachePolicy::new(config.refresh_interval());

        Self {
            db,
            config,
            source,
            photo_locator,
            photo_urls,
            cache_policy,
            in_flight: Mutex::new(()),
        }
    }

    /// Whether the next refresh will run a full sync
    ///
    /// An unreadable sync time counts as never synced.
    pub async fn needs_refresh(&self) -> bool {
        let last_refresh = match roster::load_last_refresh(&self.db).await {
            Ok(last_refresh) => last_refresh,
            Err(e) => {
                warn!("Stored sync time unreadable, treating as never synced: {}", e);
                None
            }
        };
        self.cache_policy.is_due(last_refresh, Utc::now())
    }

    /// Refresh the cached roster
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("Refresh already running, skipping");
            return RefreshOutcome::Skipped;
        };

        if !self.needs_refresh().await {
            if let Err(e) = self.photo_refresh().await {
                warn!("Photo refresh failed: {}", e);
            }
            return RefreshOutcome::PhotosOnly;
        }

        match self.sync_missionaries().await {
            Ok(count) => {
                if let Err(e) = self.record_success().await {
                    error!("Failed to record successful sync: {}", e);
                }
                RefreshOutcome::Synced { count }
            }
            Err(e) => {
                self.record_failure(&e).await;
                RefreshOutcome::Failed
            }
        }
    }

    /// Recompute photos for the cached roster only
    ///
    /// Used when the roster is fresh but photos may have been added or
    /// removed.
    pub async fn photo_refresh(&self) -> mboard_common::Result<()> {
        let mut missionaries = roster::load_missionaries(&self.db).await?;
        self.photo_locator
            .refresh_photos(&mut missionaries, &self.photo_urls);
        roster::save_missionaries(&self.db, &missionaries).await
    }

    /// Run a full sync and store the result. Returns the slide count.
    async fn sync_missionaries(&self) -> Result<usize, SyncError> {
        let records = self.source.fetch_roster().await?;
        info!(
            source = self.source.source_id(),
            "Roster records fetched: {}",
            records.len()
        );

        let normalizer = Normalizer::new(
            &self.photo_locator,
            self.config.senior_age,
            Utc::now().date_naive(),
        );
        let mut missionaries: Vec<Missionary> = records
            .iter()
            .filter(|record| record.is_currently_serving())
            .map(|record| normalizer.normalize(record))
            .collect();
        missionaries.extend(
            self.extra_records()
                .iter()
                .map(|record| normalizer.normalize(record)),
        );
        let total = missionaries.len();

        let mut missionaries = merge_couples(missionaries)?;
        self.photo_locator
            .refresh_photos(&mut missionaries, &self.photo_urls);
        missionaries.sort_by(|a, b| a.sort_name.cmp(&b.sort_name));

        log_photo_coverage(total, &missionaries);

        roster::save_missionaries(&self.db, &missionaries).await?;
        Ok(missionaries.len())
    }

    /// Extra records are optional; any problem loading them is logged and
    /// the sync continues without them.
    fn extra_records(&self) -> Vec<RawRecord> {
        let path = self.config.extra_records_path();
        match load_extra_records(&path) {
            Ok(records) => {
                if !records.is_empty() {
                    info!("Loaded {} extra missionaries", records.len());
                }
                records
            }
            Err(e) => {
                error!("Error loading extra missionaries: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn record_success(&self) -> mboard_common::Result<()> {
        roster::clear_refresh_error(&self.db).await?;
        roster::save_last_refresh(&self.db, Utc::now()).await
    }

    async fn record_failure(&self, err: &SyncError) {
        let message = err.display_for_admin();
        let last_refresh = match roster::load_last_refresh(&self.db).await {
            Ok(Some(at)) => at.to_rfc3339(),
            _ => "(never)".to_string(),
        };
        error!(
            "Error synchronizing missionaries: {}. Last sync was {}",
            message, last_refresh
        );

        if let Err(e) = roster::save_refresh_error(&self.db, &message).await {
            error!("Failed to store refresh error: {}", e);
        }
    }
}

fn log_photo_coverage(total: usize, missionaries: &[Missionary]) {
    let without_photo: Vec<&Missionary> = missionaries
        .iter()
        .filter(|m| m.image_path.is_empty())
        .collect();
    for missionary in &without_photo {
        debug!(
            id = missionary.id,
            "No photo: {} ({})", missionary.name, missionary.mission
        );
    }

    let slides = missionaries.len();
    let photo_percent = if slides > 0 {
        (slides - without_photo.len()) as f64 / slides as f64 * 100.0
    } else {
        0.0
    };
    info!("Missionary count: {} ({:.0}% with photo)", total, photo_percent);
}
