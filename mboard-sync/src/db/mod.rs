//! Database operations for the cached roster

pub mod roster;
