//! Storage for vocabulary words
//!
//! Directory structure:
//! ```text
//! <data>/vocabulary/
//! └── {word-id}.json   # One document per word
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::models::VocabularyWord;
use crate::error::{Result, VocabError};
use crate::json_file;

/// Data-access seam for vocabulary words
pub trait VocabularyStore: Send + Sync {
    fn get(&self, id: &str) -> Result<VocabularyWord>;

    fn list(&self) -> Result<Vec<VocabularyWord>>;

    /// Create or replace a word
    fn save(&self, word: &VocabularyWord) -> Result<()>;

    fn delete(&self, id: &str) -> Result<()>;

    /// Exclusive read-modify-write of one word.
    ///
    /// `apply` works on a copy; the copy is persisted only if `apply`
    /// succeeds, so a failure leaves the stored word untouched.
    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut VocabularyWord) -> Result<()>,
    ) -> Result<VocabularyWord>;
}

/// One JSON file per word, with a lock per word id
pub struct JsonVocabularyStore {
    words_dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl JsonVocabularyStore {
    /// Create a new store, creating the directory if needed
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let words_dir = data_dir.join("vocabulary");
        fs::create_dir_all(&words_dir)?;
        Ok(Self {
            words_dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Get the file path for a word.
    ///
    /// Ids outside `[A-Za-z0-9_-]` can never have been assigned, so they
    /// are reported as missing rather than turned into paths.
    fn word_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(VocabError::WordNotFound(id.to_string()));
        }
        Ok(self.words_dir.join(format!("{}.json", id)))
    }

    fn word_lock(&self, id: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| VocabError::LockPoisoned)?;
        Ok(Arc::clone(locks.entry(id.to_string()).or_default()))
    }

    /// Per-word locks guard no data, so a panic while one was held leaves
    /// nothing to repair.
    fn hold(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the lock entry for a deleted word unless another caller holds it
    fn release_lock(&self, id: &str, lock: Arc<Mutex<()>>) {
        if let Ok(mut locks) = self.locks.lock() {
            // One reference in the map, one here
            if Arc::strong_count(&lock) == 2 {
                locks.remove(id);
            }
        }
    }

    fn read_word(&self, id: &str) -> Result<VocabularyWord> {
        let path = self.word_path(id)?;
        if !path.exists() {
            return Err(VocabError::WordNotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl VocabularyStore for JsonVocabularyStore {
    fn get(&self, id: &str) -> Result<VocabularyWord> {
        self.read_word(id)
    }

    fn list(&self) -> Result<Vec<VocabularyWord>> {
        let mut words = Vec::new();

        for entry in fs::read_dir(&self.words_dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                match serde_json::from_str::<VocabularyWord>(&content) {
                    Ok(word) => words.push(word),
                    Err(e) => log::warn!("Skipping unreadable word file {:?}: {}", path, e),
                }
            }
        }

        words.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(words)
    }

    fn save(&self, word: &VocabularyWord) -> Result<()> {
        let path = self.word_path(&word.id)?;
        let lock = self.word_lock(&word.id)?;
        let _guard = Self::hold(&lock);
        json_file::write_atomic(&path, word)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.word_path(id)?;
        let lock = self.word_lock(id)?;
        let removed = {
            let _guard = Self::hold(&lock);
            if path.exists() {
                fs::remove_file(&path).map(|_| true)
            } else {
                Ok(false)
            }
        };
        self.release_lock(id, lock);

        if !removed? {
            return Err(VocabError::WordNotFound(id.to_string()));
        }
        Ok(())
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut VocabularyWord) -> Result<()>,
    ) -> Result<VocabularyWord> {
        let path = self.word_path(id)?;
        let lock = self.word_lock(id)?;
        let _guard = Self::hold(&lock);

        let mut word = self.read_word(id)?;
        apply(&mut word)?;
        json_file::write_atomic(&path, &word)?;
        Ok(word)
    }
}
