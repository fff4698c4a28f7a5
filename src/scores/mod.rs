//! IELTS test score tracking

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{overall_band, ScoreStorage};
