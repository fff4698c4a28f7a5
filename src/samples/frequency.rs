//! Word counting for work samples

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::models::WordFrequency;

/// Function words that would otherwise top every table
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "me", "more", "my",
    "no", "not", "of", "on", "or", "our", "she", "so", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "to", "up", "us", "was", "we", "were",
    "what", "when", "which", "while", "who", "will", "with", "would", "you", "your",
];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").expect("valid word pattern"))
}

/// All word tokens, lowercased, stop words included
pub fn tokenize(text: &str) -> Vec<String> {
    word_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn word_count(text: &str) -> usize {
    word_pattern().find_iter(text).count()
}

/// Add the content words of `text` to `table`
pub fn count_into(table: &mut HashMap<String, usize>, text: &str) {
    for token in tokenize(text) {
        if token.len() < 2 || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        *table.entry(token).or_insert(0) += 1;
    }
}

/// Highest counts first, ties alphabetical
pub fn top_words(table: &HashMap<String, usize>, limit: usize) -> Vec<WordFrequency> {
    let mut words: Vec<WordFrequency> = table
        .iter()
        .map(|(word, count)| WordFrequency {
            word: word.clone(),
            count: *count,
        })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(limit);
    words
}
