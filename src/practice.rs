//! Practice sessions built from due words
//!
//! The session only describes what to show; answers come back through the
//! review recorder like any other review.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};
use crate::srs::due::sort_by_due;
use crate::srs::ReviewMode;
use crate::vocabulary::{VocabularyStore, VocabularyWord};

const QUIZ_DISTRACTORS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub word_id: String,
    pub front: String,
    pub back: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word_id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub word_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PracticeSession {
    Flashcard { cards: Vec<Flashcard> },
    Quiz { questions: Vec<QuizQuestion> },
    Matching {
        english: Vec<MatchItem>,
        vietnamese: Vec<MatchItem>,
    },
}

impl PracticeSession {
    pub fn len(&self) -> usize {
        match self {
            Self::Flashcard { cards } => cards.len(),
            Self::Quiz { questions } => questions.len(),
            Self::Matching { english, .. } => english.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pick up to `size` words: due words first, then the least-known of the rest
pub fn select_words(words: &[VocabularyWord], today: NaiveDate, size: usize) -> Vec<VocabularyWord> {
    let (mut due, mut rest): (Vec<VocabularyWord>, Vec<VocabularyWord>) =
        words.iter().cloned().partition(|w| w.is_due(today));

    sort_by_due(&mut due);
    rest.sort_by(|a, b| {
        a.srs_level
            .cmp(&b.srs_level)
            .then_with(|| a.next_review.cmp(&b.next_review))
            .then_with(|| a.id.cmp(&b.id))
    });

    due.extend(rest);
    due.truncate(size);
    due
}

/// Build a session of `mode` over `selected`, drawing quiz distractors from `pool`
pub fn build_session<R: Rng + ?Sized>(
    mode: ReviewMode,
    selected: &[VocabularyWord],
    pool: &[VocabularyWord],
    rng: &mut R,
) -> PracticeSession {
    match mode {
        ReviewMode::Flashcard => PracticeSession::Flashcard {
            cards: selected
                .iter()
                .map(|w| Flashcard {
                    word_id: w.id.clone(),
                    front: w.english.clone(),
                    back: w.vietnamese.clone(),
                    context: w.context.clone(),
                    examples: w.examples.clone(),
                })
                .collect(),
        },
        ReviewMode::Quiz => PracticeSession::Quiz {
            questions: selected.iter().map(|w| quiz_question(w, pool, rng)).collect(),
        },
        ReviewMode::Matching => {
            let mut english: Vec<MatchItem> = selected
                .iter()
                .map(|w| MatchItem {
                    word_id: w.id.clone(),
                    text: w.english.clone(),
                })
                .collect();
            let mut vietnamese: Vec<MatchItem> = selected
                .iter()
                .map(|w| MatchItem {
                    word_id: w.id.clone(),
                    text: w.vietnamese.clone(),
                })
                .collect();
            english.shuffle(rng);
            vietnamese.shuffle(rng);
            PracticeSession::Matching { english, vietnamese }
        }
    }
}

fn quiz_question<R: Rng + ?Sized>(word: &VocabularyWord, pool: &[VocabularyWord], rng: &mut R) -> QuizQuestion {
    let mut candidates: Vec<&str> = Vec::new();
    for other in pool {
        let meaning = other.vietnamese.as_str();
        if other.id != word.id && meaning != word.vietnamese && !candidates.contains(&meaning) {
            candidates.push(meaning);
        }
    }

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, QUIZ_DISTRACTORS)
        .map(|s| s.to_string())
        .collect();
    options.push(word.vietnamese.clone());
    options.shuffle(rng);

    let answer_index = options
        .iter()
        .position(|o| *o == word.vietnamese)
        .unwrap_or_default();

    QuizQuestion {
        word_id: word.id.clone(),
        prompt: word.english.clone(),
        options,
        answer_index,
    }
}

/// Select words from the store and build a session
pub fn practice_session<R: Rng + ?Sized>(
    store: &dyn VocabularyStore,
    mode: ReviewMode,
    today: NaiveDate,
    size: usize,
    rng: &mut R,
) -> Result<PracticeSession> {
    if size == 0 {
        return Err(VocabError::invalid("session size must be a positive integer"));
    }
    let pool = store.list()?;
    let selected = select_words(&pool, today, size);
    Ok(build_session(mode, &selected, &pool, rng))
}
