//! Validated add / edit / search operations on top of a VocabularyStore

use std::collections::HashMap;

use chrono::Utc;

use super::models::*;
use super::store::VocabularyStore;
use crate::error::{Result, VocabError};

fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(VocabError::invalid(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_band(band: u8) -> Result<u8> {
    if !(MIN_IELTS_BAND..=MAX_IELTS_BAND).contains(&band) {
        return Err(VocabError::invalid(format!(
            "ielts_band must be between {} and {}, got {}",
            MIN_IELTS_BAND, MAX_IELTS_BAND, band
        )));
    }
    Ok(band)
}

/// Trim entries, drop blanks and exact duplicates, keep first-seen order
pub fn unique_entries(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim().to_string();
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Trim examples and drop blanks; order and repeats are kept
fn clean_examples(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Add a new word with defaults applied
pub fn create_word(store: &dyn VocabularyStore, request: CreateWordRequest) -> Result<VocabularyWord> {
    let english = required_text("english", &request.english)?;
    let vietnamese = required_text("vietnamese", &request.vietnamese)?;

    let mut word = VocabularyWord::new(english, vietnamese);
    word.context = optional_text(request.context);
    word.examples = clean_examples(request.examples);
    word.synonyms = unique_entries(request.synonyms);
    word.antonyms = unique_entries(request.antonyms);
    word.collocations = unique_entries(request.collocations);
    word.category = unique_entries(request.category);
    if let Some(band) = request.ielts_band {
        word.ielts_band = validate_band(band)?;
    }
    if let Some(difficulty) = request.difficulty {
        word.difficulty = difficulty;
    }
    if let Some(pronunciation) = request.pronunciation {
        word.pronunciation = pronunciation;
    }

    store.save(&word)?;
    log::info!("Added word '{}' ({})", word.english, word.id);
    Ok(word)
}

/// Edit the annotations of a word. Review state is never touched here.
pub fn edit_word(
    store: &dyn VocabularyStore,
    id: &str,
    request: UpdateWordRequest,
) -> Result<VocabularyWord> {
    // Validate before taking the word lock so a bad request changes nothing
    let english = request.english.as_deref().map(|v| required_text("english", v)).transpose()?;
    let vietnamese = request
        .vietnamese
        .as_deref()
        .map(|v| required_text("vietnamese", v))
        .transpose()?;
    let band = request.ielts_band.map(validate_band).transpose()?;

    let mut request = Some(request);
    store.update(id, &mut |word| {
        let Some(request) = request.take() else {
            return Ok(());
        };
        if let Some(english) = &english {
            word.english = english.clone();
        }
        if let Some(vietnamese) = &vietnamese {
            word.vietnamese = vietnamese.clone();
        }
        if request.context.is_some() {
            word.context = optional_text(request.context);
        }
        if let Some(examples) = request.examples {
            word.examples = clean_examples(examples);
        }
        if let Some(synonyms) = request.synonyms {
            word.synonyms = unique_entries(synonyms);
        }
        if let Some(antonyms) = request.antonyms {
            word.antonyms = unique_entries(antonyms);
        }
        if let Some(collocations) = request.collocations {
            word.collocations = unique_entries(collocations);
        }
        if let Some(category) = request.category {
            word.category = unique_entries(category);
        }
        if let Some(band) = band {
            word.ielts_band = band;
        }
        if let Some(difficulty) = request.difficulty {
            word.difficulty = difficulty;
        }
        if let Some(pronunciation) = request.pronunciation {
            word.pronunciation = pronunciation;
        }
        word.updated_at = Utc::now();
        Ok(())
    })
}

pub fn delete_word(store: &dyn VocabularyStore, id: &str) -> Result<()> {
    store.delete(id)?;
    log::info!("Deleted word {}", id);
    Ok(())
}

/// Words matching `filter`, sorted by English headword
pub fn search_words(store: &dyn VocabularyStore, filter: &WordFilter) -> Result<Vec<VocabularyWord>> {
    let mut words: Vec<VocabularyWord> = store
        .list()?
        .into_iter()
        .filter(|w| filter.matches(w))
        .collect();
    words.sort_by_key(|w| w.english.to_lowercase());
    Ok(words)
}

/// Category usage counts, most used first
pub fn category_counts(store: &dyn VocabularyStore) -> Result<Vec<CategoryCount>> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in store.list()? {
        for category in word.category {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    Ok(counts)
}
