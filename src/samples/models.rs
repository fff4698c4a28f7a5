//! Writing and speaking work samples

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VocabError;

/// Productive skill a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleSkill {
    Writing,
    Speaking,
}

impl SampleSkill {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Writing => "writing",
            Self::Speaking => "speaking",
        }
    }
}

impl fmt::Display for SampleSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleSkill {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "writing" => Ok(Self::Writing),
            "speaking" => Ok(Self::Speaking),
            other => Err(VocabError::invalid(format!(
                "skill must be writing or speaking, got '{}'",
                other
            ))),
        }
    }
}

/// A submitted essay or speaking transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSample {
    pub id: Uuid,
    pub skill: SampleSkill,
    #[serde(default)]
    pub title: String,
    pub text: String,
    pub word_count: usize,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSampleRequest {
    #[serde(default)]
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}
