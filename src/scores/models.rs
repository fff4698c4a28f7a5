//! IELTS test score data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Academic,
    General,
}

/// Result of one (practice or real) IELTS test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    pub id: Uuid,
    pub test_date: NaiveDate,
    #[serde(default)]
    pub test_type: TestType,
    pub listening: f32,
    pub reading: f32,
    pub writing: f32,
    pub speaking: f32,
    /// Mean of the four skills rounded to the nearest half band
    pub overall: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to record a test score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScoreRequest {
    /// Test date (YYYY-MM-DD)
    pub test_date: String,
    #[serde(default)]
    pub test_type: TestType,
    pub listening: f32,
    pub reading: f32,
    pub writing: f32,
    pub speaking: f32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAverages {
    pub listening: f32,
    pub reading: f32,
    pub writing: f32,
    pub speaking: f32,
    pub overall: f32,
}

/// Progress across all recorded tests (computed, not stored)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub latest: Option<TestScore>,
    pub best_overall: Option<f32>,
    pub averages: SkillAverages,
    /// Overall band of the latest test minus that of the first
    pub overall_change: f32,
}
