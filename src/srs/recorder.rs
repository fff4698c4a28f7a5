//! Applies review submissions to stored words

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};

use super::models::{ReviewEntry, ReviewEvent, ReviewRequest};
use super::scheduler::Scheduler;
use crate::error::Result;
use crate::vocabulary::{VocabularyStore, VocabularyWord};

/// Calendar day used for scheduling, in the learner's local time
pub fn local_day(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

pub struct ReviewRecorder {
    store: Arc<dyn VocabularyStore>,
    scheduler: Scheduler,
}

impl ReviewRecorder {
    pub fn new(store: Arc<dyn VocabularyStore>, scheduler: Scheduler) -> Self {
        Self { store, scheduler }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Record a review that happened now
    pub fn record(&self, request: &ReviewRequest) -> Result<VocabularyWord> {
        self.record_at(request, Utc::now())
    }

    /// Validate and apply one review.
    ///
    /// Either the history entry, new level and due date are all persisted,
    /// or the stored word is left exactly as it was.
    pub fn record_at(&self, request: &ReviewRequest, now: DateTime<Utc>) -> Result<VocabularyWord> {
        let event = ReviewEvent::try_from(request)?;
        let today = local_day(now);
        let scheduler = &self.scheduler;

        let word = self.store.update(&event.word_id, &mut |word| {
            let outcome = scheduler.schedule(word.srs_level, event.result, today)?;
            word.review_history.push(ReviewEntry {
                date: now,
                mode: event.mode,
                result: event.result,
            });
            word.srs_level = outcome.srs_level;
            word.next_review = Some(outcome.next_review);
            Ok(())
        })?;

        log::info!(
            "Recorded {} {} review for '{}': level {}, next review {:?}",
            event.mode,
            event.result,
            word.english,
            word.srs_level,
            word.next_review,
        );
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::srs::{ReviewMode, ReviewResult};
    use crate::srs::MAX_INTERVAL_DAYS;
    use crate::vocabulary::JsonVocabularyStore;
    use chrono::{Days, Duration};
    use std::fs;

    fn setup() -> (tempfile::TempDir, Arc<JsonVocabularyStore>, ReviewRecorder) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap());
        let recorder = ReviewRecorder::new(store.clone(), Scheduler::default());
        (dir, store, recorder)
    }

    fn saved_word(store: &JsonVocabularyStore, level: u8) -> VocabularyWord {
        let mut word = VocabularyWord::new("sustainable", "bền vững");
        word.srs_level = level;
        store.save(&word).unwrap();
        word
    }

    #[test]
    fn test_correct_quiz_review_moves_up() {
        let (_dir, store, recorder) = setup();
        let word = saved_word(&store, 2);
        let now = Utc::now();

        let updated = recorder
            .record_at(&ReviewRequest::new(&word.id, "correct", "quiz"), now)
            .unwrap();

        assert_eq!(updated.srs_level, 3);
        assert_eq!(updated.next_review, Some(local_day(now) + Duration::days(7)));
        assert_eq!(
            updated.review_history,
            vec![ReviewEntry {
                date: now,
                mode: ReviewMode::Quiz,
                result: ReviewResult::Correct,
            }]
        );
        assert_eq!(store.get(&word.id).unwrap(), updated);
    }

    #[test]
    fn test_incorrect_at_floor_stays_zero() {
        let (_dir, store, recorder) = setup();
        let word = saved_word(&store, 0);
        let now = Utc::now();

        let updated = recorder
            .record_at(&ReviewRequest::new(&word.id, "incorrect", "flashcard"), now)
            .unwrap();

        assert_eq!(updated.srs_level, 0);
        assert_eq!(updated.next_review, Some(local_day(now) + Duration::days(1)));
        assert_eq!(updated.review_history.len(), 1);
    }

    #[test]
    fn test_invalid_literals_leave_history_unchanged() {
        let (_dir, store, recorder) = setup();
        let word = saved_word(&store, 1);

        let err = recorder
            .record(&ReviewRequest::new(&word.id, "correct", "typo"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = recorder
            .record(&ReviewRequest::new(&word.id, "maybe", "quiz"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let stored = store.get(&word.id).unwrap();
        assert!(stored.review_history.is_empty());
        assert_eq!(stored, word);
    }

    #[test]
    fn test_unknown_word() {
        let (_dir, _store, recorder) = setup();
        let err = recorder
            .record(&ReviewRequest::new("does-not-exist", "correct", "quiz"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_persistence_failure_is_all_or_nothing() {
        let (dir, store, recorder) = setup();
        let word = saved_word(&store, 2);
        fs::create_dir(dir.path().join("vocabulary").join(format!("{}.json.tmp", word.id))).unwrap();

        let err = recorder
            .record(&ReviewRequest::new(&word.id, "correct", "matching"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
        assert_eq!(store.get(&word.id).unwrap(), word);
    }

    #[test]
    fn test_out_of_range_due_date_leaves_word_usable() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonVocabularyStore::new(dir.path().to_path_buf()).unwrap());
        let scheduler = Scheduler::new([1, 2, 4, 7, 14, MAX_INTERVAL_DAYS], 1).unwrap();
        let recorder = ReviewRecorder::new(store.clone(), scheduler);
        let word = saved_word(&store, 4);
        let far_future = NaiveDate::MAX
            .checked_sub_days(Days::new(100))
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();

        let err = recorder
            .record_at(&ReviewRequest::new(&word.id, "correct", "quiz"), far_future)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(store.get(&word.id).unwrap(), word);

        let updated = recorder
            .record(&ReviewRequest::new(&word.id, "incorrect", "quiz"))
            .unwrap();
        assert_eq!(updated.srs_level, 3);
        assert_eq!(updated.review_history.len(), 1);
    }

    #[test]
    fn test_retry_reapplies_same_transition() {
        let (_dir, store, recorder) = setup();
        let word = saved_word(&store, 5);
        let now = Utc::now();
        let request = ReviewRequest::new(&word.id, "correct", "flashcard");

        let first = recorder.record_at(&request, now).unwrap();
        let second = recorder.record_at(&request, now).unwrap();

        assert_eq!(first.srs_level, 5);
        assert_eq!(second.srs_level, 5);
        assert_eq!(first.next_review, second.next_review);
        assert_eq!(second.review_history.len(), 2);
    }
}
