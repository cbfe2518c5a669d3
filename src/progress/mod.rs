//! Progress Tracking: durable statistics, achievements and the
//! wrong-answer registry
//!
//! # Components
//! - `store.rs`: ProgressState + ProgressStore (load/record/save)
//! - `achievements.rs`: threshold-based milestone unlocking

pub mod achievements;
pub mod store;

pub use achievements::Achievement;
pub use store::{wrong_key, ProgressStore, Stats, StoreError, Tally, WrongEntry};
