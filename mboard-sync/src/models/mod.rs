//! Data models for the missionary roster

pub mod missionary;
pub mod raw_record;

pub use missionary::*;
pub use raw_record::*;
