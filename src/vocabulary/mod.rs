//! Vocabulary words: models, the store seam and validated catalogue operations

pub mod catalog;
pub mod models;
pub mod store;

pub use catalog::{category_counts, create_word, delete_word, edit_word, search_words};
pub use models::*;
pub use store::{JsonVocabularyStore, VocabularyStore};
