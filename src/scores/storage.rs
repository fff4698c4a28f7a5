//! Test score storage, kept in a single scores.json document

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::models::*;
use crate::error::{Result, VocabError};
use crate::json_file;

/// Overall band: mean of the four skills rounded to the nearest half band.
///
/// Quarter values round up (6.25 -> 6.5, 6.75 -> 7.0).
pub fn overall_band(listening: f32, reading: f32, writing: f32, speaking: f32) -> f32 {
    let mean = (listening + reading + writing + speaking) / 4.0;
    (mean * 2.0).round() / 2.0
}

fn validate_band(skill: &str, band: f32) -> Result<f32> {
    let doubled = band * 2.0;
    if !(0.0..=9.0).contains(&band) || (doubled - doubled.round()).abs() > f32::EPSILON {
        return Err(VocabError::invalid(format!(
            "{} band must be between 0 and 9 in steps of 0.5, got {}",
            skill, band
        )));
    }
    Ok(band)
}

pub struct ScoreStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ScoreStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join("scores.json"),
            lock: Mutex::new(()),
        })
    }

    fn read_scores(&self) -> Result<Vec<TestScore>> {
        json_file::read_or_default(&self.path)
    }

    /// All scores, oldest test first
    pub fn list_scores(&self) -> Result<Vec<TestScore>> {
        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        self.read_scores()
    }

    pub fn add_score(&self, request: CreateScoreRequest) -> Result<TestScore> {
        let test_date = NaiveDate::parse_from_str(request.test_date.trim(), "%Y-%m-%d")
            .map_err(|e| VocabError::invalid(format!("Invalid test date: {}", e)))?;
        let listening = validate_band("listening", request.listening)?;
        let reading = validate_band("reading", request.reading)?;
        let writing = validate_band("writing", request.writing)?;
        let speaking = validate_band("speaking", request.speaking)?;

        let score = TestScore {
            id: Uuid::new_v4(),
            test_date,
            test_type: request.test_type,
            listening,
            reading,
            writing,
            speaking,
            overall: overall_band(listening, reading, writing, speaking),
            notes: request
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_at: Utc::now(),
        };

        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        let mut scores = self.read_scores()?;
        scores.push(score.clone());
        scores.sort_by(|a, b| a.test_date.cmp(&b.test_date).then_with(|| a.created_at.cmp(&b.created_at)));
        json_file::write_atomic(&self.path, &scores)?;

        log::info!("Recorded {} test score {} on {}", score.overall, score.id, score.test_date);
        Ok(score)
    }

    pub fn delete_score(&self, id: Uuid) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        let mut scores = self.read_scores()?;
        let before = scores.len();
        scores.retain(|s| s.id != id);
        if scores.len() == before {
            return Err(VocabError::NotFound(format!("Score {}", id)));
        }
        json_file::write_atomic(&self.path, &scores)
    }

    pub fn summary(&self) -> Result<ScoreSummary> {
        Ok(summarize(&self.list_scores()?))
    }
}

/// Summarize scores sorted oldest first
pub fn summarize(scores: &[TestScore]) -> ScoreSummary {
    let (Some(first), Some(latest)) = (scores.first(), scores.last()) else {
        return ScoreSummary::default();
    };

    let count = scores.len() as f32;
    let mean = |f: fn(&TestScore) -> f32| scores.iter().map(f).sum::<f32>() / count;

    ScoreSummary {
        count: scores.len(),
        latest: Some(latest.clone()),
        best_overall: scores.iter().map(|s| s.overall).reduce(f32::max),
        averages: SkillAverages {
            listening: mean(|s| s.listening),
            reading: mean(|s| s.reading),
            writing: mean(|s| s.writing),
            speaking: mean(|s| s.speaking),
            overall: mean(|s| s.overall),
        },
        overall_change: latest.overall - first.overall,
    }
}
