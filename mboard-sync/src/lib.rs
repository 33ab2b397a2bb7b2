//! Missionary roster synchronization engine
//!
//! Fetches the full-time missionary roster for a stake, normalizes each
//! record, folds senior couples into a single card, attaches photos from the
//! instance `photos/` folder and caches the sorted result in the settings
//! database. Page renders read the cache through [`MissionaryBoard`]; a
//! refresh is fired in the background after each render.

pub mod board;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod types;

pub use board::MissionaryBoard;
pub use error::{RosterError, SyncError};
pub use models::{Gender, Missionary, RawMember, RawRecord};
pub use types::{RefreshOutcome, RosterSource};
