//! Storage for work samples and their word-frequency tables
//!
//! Directory structure:
//! ```text
//! <data>/samples/{skill}.json       # Array of samples for the skill
//! <data>/frequencies/{skill}.json   # word -> count for the skill
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::frequency::{count_into, top_words, word_count};
use super::models::*;
use crate::error::{Result, VocabError};
use crate::json_file;

pub struct SampleStorage {
    samples_dir: PathBuf,
    frequencies_dir: PathBuf,
    lock: Mutex<()>,
}

impl SampleStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let samples_dir = data_dir.join("samples");
        let frequencies_dir = data_dir.join("frequencies");
        fs::create_dir_all(&samples_dir)?;
        fs::create_dir_all(&frequencies_dir)?;
        Ok(Self {
            samples_dir,
            frequencies_dir,
            lock: Mutex::new(()),
        })
    }

    fn samples_path(&self, skill: SampleSkill) -> PathBuf {
        self.samples_dir.join(format!("{}.json", skill))
    }

    fn frequencies_path(&self, skill: SampleSkill) -> PathBuf {
        self.frequencies_dir.join(format!("{}.json", skill))
    }

    fn read_samples(&self, skill: SampleSkill) -> Result<Vec<WorkSample>> {
        json_file::read_or_default(&self.samples_path(skill))
    }

    fn read_table(&self, skill: SampleSkill) -> Result<HashMap<String, usize>> {
        json_file::read_or_default(&self.frequencies_path(skill))
    }

    /// Write `samples` and a table rebuilt from them.
    ///
    /// If the table cannot be written the `previous` samples are put back,
    /// so the two files never disagree.
    fn persist(&self, skill: SampleSkill, samples: &[WorkSample], previous: &[WorkSample]) -> Result<()> {
        let mut table = HashMap::new();
        for sample in samples {
            count_into(&mut table, &sample.text);
        }

        json_file::write_atomic(&self.samples_path(skill), samples)?;
        if let Err(e) = json_file::write_atomic(&self.frequencies_path(skill), &table) {
            if let Err(restore) = json_file::write_atomic(&self.samples_path(skill), previous) {
                log::error!("Failed to restore {} samples: {}", skill, restore);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Samples for a skill, newest first
    pub fn list_samples(&self, skill: SampleSkill) -> Result<Vec<WorkSample>> {
        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        let mut samples = self.read_samples(skill)?;
        samples.reverse();
        Ok(samples)
    }

    /// Store a sample and fold its words into the skill's frequency table
    pub fn submit_sample(&self, skill: SampleSkill, request: SubmitSampleRequest) -> Result<WorkSample> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(VocabError::invalid("sample text must not be empty"));
        }

        let sample = WorkSample {
            id: Uuid::new_v4(),
            skill,
            title: request.title.trim().to_string(),
            text: text.to_string(),
            word_count: word_count(text),
            submitted_at: Utc::now(),
        };

        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        let previous = self.read_samples(skill)?;
        let mut samples = previous.clone();
        samples.push(sample.clone());
        self.persist(skill, &samples, &previous)?;

        log::info!("Stored {} sample {} ({} words)", skill, sample.id, sample.word_count);
        Ok(sample)
    }

    /// Remove a sample and rebuild the skill's frequency table
    pub fn delete_sample(&self, skill: SampleSkill, id: Uuid) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        let previous = self.read_samples(skill)?;
        let samples: Vec<WorkSample> = previous.iter().filter(|s| s.id != id).cloned().collect();
        if samples.len() == previous.len() {
            return Err(VocabError::NotFound(format!("Sample {}", id)));
        }
        self.persist(skill, &samples, &previous)
    }

    pub fn top_words(&self, skill: SampleSkill, limit: usize) -> Result<Vec<WordFrequency>> {
        let _guard = self.lock.lock().map_err(|_| VocabError::LockPoisoned)?;
        Ok(top_words(&self.read_table(skill)?, limit))
    }
}
