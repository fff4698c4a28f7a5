use std::path::PathBuf;
use std::sync::Arc;

pub mod config;
pub mod error;
mod json_file;
pub mod practice;
pub mod samples;
pub mod scores;
pub mod server;
pub mod srs;
pub mod vocabulary;

use config::AppConfig;
use error::Result;
use samples::SampleStorage;
use scores::ScoreStorage;
use srs::{ReviewRecorder, Scheduler};
use vocabulary::{JsonVocabularyStore, VocabularyStore};

pub struct AppState {
    pub store: Arc<dyn VocabularyStore>,
    pub recorder: ReviewRecorder,
    pub scores: ScoreStorage,
    pub samples: SampleStorage,
    /// Learner every authenticated request acts as
    pub user: String,
    pub token: String,
    pub due_limit: usize,
}

impl AppState {
    /// Open every store under `data_dir`
    pub fn new(data_dir: PathBuf, config: &AppConfig, token: String) -> Result<Self> {
        let store: Arc<dyn VocabularyStore> = Arc::new(JsonVocabularyStore::new(data_dir.clone())?);
        let scheduler = Scheduler::from_config(&config.srs)?;
        log::info!("Using data directory {:?}", data_dir);

        Ok(Self {
            recorder: ReviewRecorder::new(Arc::clone(&store), scheduler),
            store,
            scores: ScoreStorage::new(data_dir.clone())?,
            samples: SampleStorage::new(data_dir)?,
            user: config.server.user.clone(),
            token,
            due_limit: config.review.due_limit,
        })
    }
}
