//! Business logic services

pub mod cache_policy;
pub mod couple_merger;
pub mod extra_records;
pub mod lcr_client;
pub mod listing;
pub mod normalizer;
pub mod photo_locator;
pub mod sync_orchestrator;

pub use cache_policy::CachePolicy;
pub use couple_merger::{dates_serving_nearly_equal, merge_couples};
pub use extra_records::load_extra_records;
pub use lcr_client::LcrClient;
pub use normalizer::Normalizer;
pub use photo_locator::{PhotoLocator, PhotoUrls};
pub use sync_orchestrator::SyncOrchestrator;
