//! Review statistics over the whole vocabulary

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use super::models::ReviewStats;
use super::recorder::local_day;
use super::scheduler::MAX_SRS_LEVEL;
use crate::error::Result;
use crate::vocabulary::{VocabularyStore, VocabularyWord};

pub fn review_stats(store: &dyn VocabularyStore, today: NaiveDate) -> Result<ReviewStats> {
    Ok(compute_stats(&store.list()?, today))
}

pub fn compute_stats(words: &[VocabularyWord], today: NaiveDate) -> ReviewStats {
    let mut stats = ReviewStats {
        total_words: words.len(),
        ..Default::default()
    };
    let mut review_days = BTreeSet::new();

    for word in words {
        let level = word.srs_level.min(MAX_SRS_LEVEL);
        stats.level_counts[level as usize] += 1;
        if level == MAX_SRS_LEVEL {
            stats.mastered_words += 1;
        }
        if word.review_history.is_empty() {
            stats.new_words += 1;
        }
        if word.is_due(today) {
            stats.due_words += 1;
        }

        for entry in &word.review_history {
            let day = local_day(entry.date);
            review_days.insert(day);
            if day == today {
                stats.reviews_today += 1;
                if entry.result.is_correct() {
                    stats.correct_today += 1;
                }
            }
        }
    }

    if stats.reviews_today > 0 {
        stats.accuracy_today = stats.correct_today as f64 / stats.reviews_today as f64;
    }
    stats.streak_days = streak(&review_days, today);
    stats
}

/// Consecutive review days ending today, or yesterday if nothing was reviewed yet today
fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut count = 0;
    while days.contains(&day) {
        count += 1;
        day = day - Duration::days(1);
    }
    count
}
