use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use vocab_lib::config::AppConfig;
use vocab_lib::samples::SampleStorage;
use vocab_lib::scores::ScoreStorage;
use vocab_lib::srs::{ReviewRecorder, Scheduler};
use vocab_lib::vocabulary::{JsonVocabularyStore, VocabularyStore, VocabularyWord};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub store: Arc<dyn VocabularyStore>,
    pub recorder: ReviewRecorder,
    pub scores: ScoreStorage,
    pub samples: SampleStorage,
}

impl App {
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = AppConfig::load(config_path).context("Failed to load config")?;
        if data_dir.is_some() {
            config.storage.data_dir = data_dir;
        }
        let data_dir = config.data_dir()?;

        let store: Arc<dyn VocabularyStore> = Arc::new(
            JsonVocabularyStore::new(data_dir.clone()).context("Failed to open vocabulary store")?,
        );
        let scheduler = Scheduler::from_config(&config.srs).context("Invalid [srs] config")?;

        Ok(Self {
            recorder: ReviewRecorder::new(Arc::clone(&store), scheduler),
            store,
            scores: ScoreStorage::new(data_dir.clone()).context("Failed to open score storage")?,
            samples: SampleStorage::new(data_dir).context("Failed to open sample storage")?,
            config,
        })
    }

    /// Find a word by id, id prefix or English text (case-insensitive)
    pub fn find_word(&self, query: &str) -> Result<VocabularyWord> {
        let words = self.store.list().context("Failed to list words")?;
        let query = query.trim();
        let query_lower = query.to_lowercase();

        if let Some(word) = words
            .iter()
            .find(|w| w.id == query || w.english.to_lowercase() == query_lower)
        {
            return Ok(word.clone());
        }

        let matches: Vec<&VocabularyWord> = words
            .iter()
            .filter(|w| w.id.starts_with(query) || w.english.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!("No word matching '{}'", query),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous word '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|w| format!("  - {} ({})", w.english, w.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}
