//! Spaced repetition for vocabulary words
//!
//! This module provides:
//! - Level-based scheduling (levels 0-5, escalating intervals, lapse reset)
//! - Review recording with all-or-nothing persistence
//! - Due-word queries and review statistics

pub mod due;
pub mod models;
pub mod recorder;
pub mod scheduler;
pub mod stats;

pub use due::{due_queue, due_words};
pub use models::*;
pub use recorder::{local_day, ReviewRecorder};
pub use scheduler::{format_interval, Scheduler, LEVEL_COUNT, MAX_INTERVAL_DAYS, MAX_SRS_LEVEL};
pub use stats::review_stats;
