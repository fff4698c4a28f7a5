//! Writing/speaking work samples and per-skill word frequency

pub mod frequency;
pub mod models;
pub mod storage;

pub use models::*;
pub use storage::SampleStorage;
