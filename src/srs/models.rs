//! Data models for the review lifecycle

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VocabError;
use crate::vocabulary::VocabularyWord;

/// Outcome of a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewResult {
    Correct,
    Incorrect,
}

impl ReviewResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl fmt::Display for ReviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewResult {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correct" => Ok(Self::Correct),
            "incorrect" => Ok(Self::Incorrect),
            other => Err(VocabError::invalid(format!(
                "result must be 'correct' or 'incorrect', got '{}'",
                other
            ))),
        }
    }
}

/// Practice mode a review came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    Flashcard,
    Quiz,
    Matching,
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Quiz => "quiz",
            Self::Matching => "matching",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcard" => Ok(Self::Flashcard),
            "quiz" => Ok(Self::Quiz),
            "matching" => Ok(Self::Matching),
            other => Err(VocabError::invalid(format!(
                "mode must be 'flashcard', 'quiz' or 'matching', got '{}'",
                other
            ))),
        }
    }
}

/// One entry of a word's review history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub date: DateTime<Utc>,
    pub mode: ReviewMode,
    pub result: ReviewResult,
}

/// Review submission as it arrives from a client.
///
/// `result` and `mode` are kept as plain strings so that unknown values are
/// reported as invalid arguments rather than as a body parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub word_id: String,
    pub result: String,
    pub mode: String,
}

impl ReviewRequest {
    pub fn new(word_id: impl Into<String>, result: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            word_id: word_id.into(),
            result: result.into(),
            mode: mode.into(),
        }
    }
}

/// A validated review submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
    pub word_id: String,
    pub result: ReviewResult,
    pub mode: ReviewMode,
}

impl TryFrom<&ReviewRequest> for ReviewEvent {
    type Error = VocabError;

    fn try_from(request: &ReviewRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            word_id: request.word_id.trim().to_string(),
            result: request.result.trim().parse()?,
            mode: request.mode.trim().parse()?,
        })
    }
}

/// Level and due date produced by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub srs_level: u8,
    pub next_review: NaiveDate,
}

/// What each answer would do to a word, shown before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePreview {
    pub correct: ScheduleOutcome,
    pub incorrect: ScheduleOutcome,
}

/// Due words up to a limit, with the total before the limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueQueue {
    pub count: usize,
    pub words: Vec<VocabularyWord>,
}

/// Review statistics over the whole vocabulary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_words: usize,
    /// Words that have never been reviewed
    pub new_words: usize,
    pub due_words: usize,
    /// Word count per SRS level 0-5
    pub level_counts: [usize; 6],
    pub mastered_words: usize,
    pub reviews_today: usize,
    pub correct_today: usize,
    pub accuracy_today: f64,
    pub streak_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!("correct".parse::<ReviewResult>().unwrap(), ReviewResult::Correct);
        assert_eq!("matching".parse::<ReviewMode>().unwrap(), ReviewMode::Matching);
        assert!("maybe".parse::<ReviewResult>().is_err());
        assert!("typo".parse::<ReviewMode>().is_err());
        // Literals are case-sensitive
        assert!("Quiz".parse::<ReviewMode>().is_err());
    }

    #[test]
    fn test_event_from_request() {
        let request = ReviewRequest::new(" abc ", "incorrect", "flashcard");
        let event = ReviewEvent::try_from(&request).unwrap();
        assert_eq!(event.word_id, "abc");
        assert_eq!(event.result, ReviewResult::Incorrect);
        assert_eq!(event.mode, ReviewMode::Flashcard);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = ReviewEntry {
            date: Utc::now(),
            mode: ReviewMode::Quiz,
            result: ReviewResult::Correct,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mode"], "quiz");
        assert_eq!(json["result"], "correct");
    }
}
