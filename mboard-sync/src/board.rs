//! Missionary board facade
//!
//! What a slideshow page handler needs: read a page of slides and the last
//! refresh error from the cache, then kick off a background refresh.

use crate::db::roster;
use crate::models::Missionary;
use crate::services::listing;
use crate::services::sync_orchestrator::SyncOrchestrator;
use crate::types::{RefreshOutcome, RosterSource};
use mboard_common::SyncConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Missionary repository and cache, shared across page handlers
#[derive(Clone)]
pub struct MissionaryBoard {
    db: SqlitePool,
    orchestrator: Arc<SyncOrchestrator>,
    page_size: usize,
}

impl MissionaryBoard {
    pub fn new(db: SqlitePool, config: SyncConfig, source: Arc<dyn RosterSource>) -> Self {
        let page_size = config.page_size;
        let orchestrator = Arc::new(SyncOrchestrator::new(db.clone(), config, source));
        Self {
            db,
            orchestrator,
            page_size,
        }
    }

    /// Refresh the cache, waiting for completion
    pub async fn refresh(&self) -> RefreshOutcome {
        self.orchestrator.refresh().await
    }

    /// Fire-and-forget refresh, run after a page has been rendered
    pub fn spawn_refresh(&self) -> JoinHandle<RefreshOutcome> {
        let orchestrator = Arc::clone(&self.orchestrator);
        tokio::spawn(async move { orchestrator.refresh().await })
    }

    /// Whether the next refresh will run a full sync
    pub async fn needs_refresh(&self) -> bool {
        self.orchestrator.needs_refresh().await
    }

    /// Page of slides and the next offset (0 after the last page)
    pub async fn list_range(&self, offset: usize, limit: usize) -> (Vec<Missionary>, usize) {
        listing::list_range(&self.db, offset, limit).await
    }

    /// Page of slides using the configured page size
    pub async fn list_page(&self, offset: usize) -> (Vec<Missionary>, usize) {
        self.list_range(offset, self.page_size).await
    }

    pub async fn list_range_filtered<F>(
        &self,
        offset: usize,
        limit: usize,
        filter: F,
    ) -> (Vec<Missionary>, usize)
    where
        F: Fn(&Missionary) -> bool,
    {
        listing::list_range_filtered(&self.db, offset, limit, filter).await
    }

    /// Error from the last refresh, or an empty string
    pub async fn get_refresh_error(&self) -> String {
        listing::get_refresh_error(&self.db).await
    }

    /// Drop the cached roster, sync time and error
    pub async fn clear(&self) -> mboard_common::Result<()> {
        roster::clear_all(&self.db).await
    }
}
