//! Level-based review scheduler
//!
//! Each word carries an SRS level from 0 to 5. A correct answer moves the
//! word up one level and schedules it after that level's interval; an
//! incorrect answer moves it down one level and schedules it after the short
//! lapse interval, whatever the previous level was.
//!
//! Default intervals (days): level 0 → 1, 1 → 2, 2 → 4, 3 → 7, 4 → 14, 5 → 30.

use chrono::{Days, NaiveDate};

use super::models::{ReviewResult, ScheduleOutcome, SchedulePreview};
use crate::config::SrsConfig;
use crate::error::{Result, VocabError};

/// Highest SRS level
pub const MAX_SRS_LEVEL: u8 = 5;

/// Number of SRS levels (0 through MAX_SRS_LEVEL)
pub const LEVEL_COUNT: usize = MAX_SRS_LEVEL as usize + 1;

const DEFAULT_INTERVALS: [i64; LEVEL_COUNT] = [1, 2, 4, 7, 14, 30];
const DEFAULT_LAPSE_INTERVAL: i64 = 1;

/// Longest interval a curve may use (about a century)
pub const MAX_INTERVAL_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    intervals: [i64; LEVEL_COUNT],
    lapse_interval: i64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS,
            lapse_interval: DEFAULT_LAPSE_INTERVAL,
        }
    }
}

impl Scheduler {
    /// Create a scheduler from a custom curve.
    ///
    /// Intervals must be positive and non-decreasing; the lapse interval must
    /// not be negative. Neither may exceed `MAX_INTERVAL_DAYS`.
    pub fn new(intervals: [i64; LEVEL_COUNT], lapse_interval: i64) -> Result<Self> {
        if intervals.iter().any(|&days| days <= 0) {
            return Err(VocabError::invalid("SRS intervals must be positive"));
        }
        if intervals.iter().any(|&days| days > MAX_INTERVAL_DAYS) {
            return Err(VocabError::invalid(format!(
                "SRS intervals must not exceed {} days",
                MAX_INTERVAL_DAYS
            )));
        }
        if intervals.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(VocabError::invalid("SRS intervals must not decrease"));
        }
        if lapse_interval < 0 {
            return Err(VocabError::invalid("lapse interval must not be negative"));
        }
        if lapse_interval > MAX_INTERVAL_DAYS {
            return Err(VocabError::invalid(format!(
                "lapse interval must not exceed {} days",
                MAX_INTERVAL_DAYS
            )));
        }
        Ok(Self {
            intervals,
            lapse_interval,
        })
    }

    pub fn from_config(config: &SrsConfig) -> Result<Self> {
        let intervals: [i64; LEVEL_COUNT] =
            config.intervals_days.as_slice().try_into().map_err(|_| {
                VocabError::invalid(format!(
                    "expected {} SRS intervals, got {}",
                    LEVEL_COUNT,
                    config.intervals_days.len()
                ))
            })?;
        Self::new(intervals, config.lapse_interval_days)
    }

    /// Days until the next review for a word at `level`
    pub fn interval_days(&self, level: u8) -> i64 {
        self.intervals[level.min(MAX_SRS_LEVEL) as usize]
    }

    pub fn lapse_interval_days(&self) -> i64 {
        self.lapse_interval
    }

    /// Compute the new level and due date for a review outcome.
    ///
    /// Levels above the maximum are treated as the maximum. A due date past
    /// the calendar's range is an error, never a panic.
    pub fn schedule(&self, current_level: u8, result: ReviewResult, today: NaiveDate) -> Result<ScheduleOutcome> {
        let current = current_level.min(MAX_SRS_LEVEL);

        let (srs_level, days) = match result {
            ReviewResult::Correct => {
                let level = (current + 1).min(MAX_SRS_LEVEL);
                (level, self.interval_days(level))
            }
            ReviewResult::Incorrect => (current.saturating_sub(1), self.lapse_interval),
        };

        let next_review = u64::try_from(days)
            .ok()
            .and_then(|days| today.checked_add_days(Days::new(days)))
            .ok_or_else(|| {
                VocabError::invalid(format!("next review {} days after {} is out of range", days, today))
            })?;

        Ok(ScheduleOutcome {
            srs_level,
            next_review,
        })
    }

    pub fn preview(&self, current_level: u8, today: NaiveDate) -> Result<SchedulePreview> {
        Ok(SchedulePreview {
            correct: self.schedule(current_level, ReviewResult::Correct, today)?,
            incorrect: self.schedule(current_level, ReviewResult::Incorrect, today)?,
        })
    }
}

/// Format an interval in days to a short human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "today".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
