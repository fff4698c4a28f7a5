//! Data models for vocabulary words

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VocabError;
use crate::srs::ReviewEntry;

pub const MIN_IELTS_BAND: u8 = 5;
pub const MAX_IELTS_BAND: u8 = 8;

fn default_ielts_band() -> u8 {
    6
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(VocabError::invalid(format!(
                "difficulty must be easy, medium or hard, got '{}'",
                other
            ))),
        }
    }
}

/// Stored audio filenames for each language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub vi: Option<String>,
}

/// An English-Vietnamese word pair with its annotations and review state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: String,
    pub english: String,
    pub vietnamese: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub collocations: Vec<String>,
    #[serde(default = "default_ielts_band")]
    pub ielts_band: u8,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub pronunciation: Pronunciation,
    /// Only ever changed by the review scheduler
    #[serde(default)]
    pub srs_level: u8,
    #[serde(default)]
    pub next_review: Option<NaiveDate>,
    #[serde(default)]
    pub review_history: Vec<ReviewEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VocabularyWord {
    pub fn new(english: impl Into<String>, vietnamese: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            english: english.into(),
            vietnamese: vietnamese.into(),
            context: None,
            examples: Vec::new(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            collocations: Vec::new(),
            ielts_band: default_ielts_band(),
            category: Vec::new(),
            difficulty: Difficulty::default(),
            pronunciation: Pronunciation::default(),
            srs_level: 0,
            next_review: None,
            review_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Unscheduled words are always due
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review.map_or(true, |date| date <= today)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category.iter().any(|c| c.eq_ignore_ascii_case(category))
    }
}

/// Request to add a word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWordRequest {
    pub english: String,
    pub vietnamese: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub collocations: Vec<String>,
    #[serde(default)]
    pub ielts_band: Option<u8>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub pronunciation: Option<Pronunciation>,
}

/// Request to edit a word; absent fields are left as they are.
///
/// An empty `context` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWordRequest {
    pub english: Option<String>,
    pub vietnamese: Option<String>,
    pub context: Option<String>,
    pub examples: Option<Vec<String>>,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub collocations: Option<Vec<String>>,
    pub ielts_band: Option<u8>,
    pub category: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,
    pub pronunciation: Option<Pronunciation>,
}

/// Filter for listing words; empty fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub band: Option<u8>,
}

impl WordFilter {
    pub fn matches(&self, word: &VocabularyWord) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            if !word.english.to_lowercase().contains(&query)
                && !word.vietnamese.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if !word.has_category(category) {
                return false;
            }
        }
        if self.difficulty.is_some_and(|d| d != word.difficulty) {
            return false;
        }
        if self.band.is_some_and(|b| b != word.ielts_band) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_word_defaults() {
        let word = VocabularyWord::new("resilient", "kiên cường");
        assert_eq!(word.ielts_band, 6);
        assert_eq!(word.difficulty, Difficulty::Medium);
        assert_eq!(word.srs_level, 0);
        assert!(word.next_review.is_none());
        assert!(word.review_history.is_empty());
        assert!(Uuid::parse_str(&word.id).is_ok());
    }

    #[test]
    fn test_minimal_document_deserializes_with_defaults() {
        let json = r#"{
            "id": "w1",
            "english": "abundant",
            "vietnamese": "dồi dào",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }"#;
        let word: VocabularyWord = serde_json::from_str(json).unwrap();
        assert_eq!(word.ielts_band, 6);
        assert_eq!(word.srs_level, 0);
        assert!(word.pronunciation.en.is_none());
    }

    #[test]
    fn test_is_due() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let mut word = VocabularyWord::new("a", "b");
        assert!(word.is_due(today));

        word.next_review = Some(today);
        assert!(word.is_due(today));

        word.next_review = today.succ_opt();
        assert!(!word.is_due(today));
    }

    #[test]
    fn test_filter() {
        let mut word = VocabularyWord::new("Environment", "môi trường");
        word.category = vec!["Nature".to_string()];
        word.difficulty = Difficulty::Hard;
        word.ielts_band = 7;

        assert!(WordFilter::default().matches(&word));
        assert!(WordFilter { query: Some("environ".into()), ..Default::default() }.matches(&word));
        assert!(WordFilter { query: Some("MÔI".into()), ..Default::default() }.matches(&word));
        assert!(WordFilter { category: Some("nature".into()), ..Default::default() }.matches(&word));
        assert!(!WordFilter { category: Some("health".into()), ..Default::default() }.matches(&word));
        assert!(!WordFilter { difficulty: Some(Difficulty::Easy), ..Default::default() }.matches(&word));
        assert!(!WordFilter { band: Some(6), ..Default::default() }.matches(&word));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
