//! Queries for words that are due for review

use chrono::NaiveDate;

use super::models::DueQueue;
use crate::error::{Result, VocabError};
use crate::vocabulary::{VocabularyStore, VocabularyWord};

/// Sort earliest-due first; unscheduled words come before any date
pub(crate) fn sort_by_due(words: &mut [VocabularyWord]) {
    words.sort_by(|a, b| {
        a.next_review
            .cmp(&b.next_review)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Words that are unscheduled or due on or before `today`, earliest first.
///
/// `count` covers every due word; `words` stops at `limit`.
pub fn due_queue(store: &dyn VocabularyStore, today: NaiveDate, limit: usize) -> Result<DueQueue> {
    if limit == 0 {
        return Err(VocabError::invalid("limit must be a positive integer"));
    }

    let mut due: Vec<VocabularyWord> = store
        .list()?
        .into_iter()
        .filter(|w| w.is_due(today))
        .collect();
    let count = due.len();

    sort_by_due(&mut due);
    due.truncate(limit);
    Ok(DueQueue { count, words: due })
}

/// Up to `limit` due words
pub fn due_words(store: &dyn VocabularyStore, today: NaiveDate, limit: usize) -> Result<Vec<VocabularyWord>> {
    Ok(due_queue(store, today, limit)?.words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::JsonVocabularyStore;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn add(store: &JsonVocabularyStore, english: &str, next_review: Option<NaiveDate>) -> VocabularyWord {
        let mut word = VocabularyWord::new(english, "x");
        word.next_review = next_review;
        store.save(&word).unwrap();
        word
    }

    #[test]
    fn test_due_ordering_and_exclusion() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap();

        let a = add(&store, "A", Some(today() - Duration::days(1)));
        let _b = add(&store, "B", Some(today() + Duration::days(1)));
        let c = add(&store, "C", None);

        let due = due_words(&store, today(), 10).unwrap();
        let ids: Vec<&str> = due.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), a.id.as_str()]);
        assert_eq!(due_queue(&store, today(), 10).unwrap().count, 2);
    }

    #[test]
    fn test_due_today_included_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap();

        let today_word = add(&store, "today", Some(today()));
        let old = add(&store, "old", Some(today() - Duration::days(10)));

        let due = due_words(&store, today(), 10).unwrap();
        assert_eq!(due[0].id, old.id);
        assert_eq!(due[1].id, today_word.id);
    }

    #[test]
    fn test_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap();
        for i in 0..5 {
            add(&store, &format!("w{}", i), None);
        }

        assert_eq!(due_words(&store, today(), 3).unwrap().len(), 3);
        assert!(due_words(&store, today(), 0).is_err());
    }

    #[test]
    fn test_queue_counts_past_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap();
        let first = add(&store, "first", Some(today() - Duration::days(3)));
        add(&store, "second", Some(today() - Duration::days(1)));
        add(&store, "third", None);
        add(&store, "later", Some(today() + Duration::days(2)));

        let queue = due_queue(&store, today(), 2).unwrap();
        assert_eq!(queue.count, 3);
        assert_eq!(queue.words.len(), 2);
        assert_eq!(queue.words[1].id, first.id);
        assert_eq!(due_queue(&store, today(), 0).unwrap_err().kind(), crate::error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_query_does_not_mutate() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap();
        let word = add(&store, "A", None);

        due_words(&store, today(), 10).unwrap();
        assert_eq!(store.get(&word.id).unwrap(), word);
    }
}
