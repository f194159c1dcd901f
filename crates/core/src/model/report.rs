use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerRecord, AttemptId};
use crate::scoring;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("ended_at is before started_at")]
    InvalidTimeRange,

    #[error("too many questions for a single attempt: {len}")]
    TooManyQuestions { len: usize },
}

/// Per-bucket tally used for category and difficulty breakdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakdownTally {
    pub total: u32,
    pub answered: u32,
    pub correct: u32,
}

impl BreakdownTally {
    /// Fold one question's outcome into the tally. `record` is `None` for a
    /// question that was never submitted.
    pub fn record(&mut self, record: Option<&AnswerRecord>) {
        self.total = self.total.saturating_add(1);
        if let Some(record) = record {
            self.answered = self.answered.saturating_add(1);
            if record.is_correct() {
                self.correct = self.correct.saturating_add(1);
            }
        }
    }
}

/// Final result of a finalized quiz attempt.
///
/// Derived entirely from the committed answer records, so it can be rebuilt
/// at any time from the same session without drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    attempt_id: AttemptId,
    category: String,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    total_questions: u32,
    correct_count: u32,
    wrong_count: u32,
    total_score: u32,
    max_score: u32,
    accuracy_rate: u32,
}

impl QuizReport {
    /// Build a report from the per-question record slots of a session.
    ///
    /// A `None` slot is a question that was never submitted; by policy it
    /// counts as wrong, so `wrong_count` is always
    /// `total_questions - correct_count`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `ended_at` is before
    /// `started_at`, and `ReportError::TooManyQuestions` if the question
    /// count cannot fit in `u32`.
    pub fn from_records(
        attempt_id: AttemptId,
        category: impl Into<String>,
        records: &[Option<AnswerRecord>],
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        if ended_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }
        let total_questions = u32::try_from(records.len())
            .map_err(|_| ReportError::TooManyQuestions { len: records.len() })?;

        let mut correct_count = 0_u32;
        let mut total_score = 0_u32;
        for record in records.iter().flatten() {
            if record.is_correct() {
                correct_count = correct_count.saturating_add(1);
            }
            total_score = total_score.saturating_add(record.score());
        }

        let accuracy_rate = if total_questions == 0 {
            0
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                (f64::from(correct_count) / f64::from(total_questions) * 100.0).round() as u32
            }
        };

        Ok(Self {
            attempt_id,
            category: category.into(),
            started_at,
            ended_at,
            total_questions,
            correct_count,
            wrong_count: total_questions - correct_count,
            total_score,
            max_score: scoring::max_score(records.len()),
            accuracy_rate,
        })
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    /// Attempt duration in milliseconds.
    #[must_use]
    pub fn total_time_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Incorrect plus never-submitted questions.
    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Correct answers as a rounded percentage of all questions.
    #[must_use]
    pub fn accuracy_rate(&self) -> u32 {
        self.accuracy_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn record(id: u64, is_correct: bool, score: u32) -> Option<AnswerRecord> {
        Some(AnswerRecord::new(
            QuestionId::new(id),
            vec![0],
            is_correct,
            score,
            fixed_now(),
        ))
    }

    #[test]
    fn report_counts_unanswered_as_wrong() {
        // 3 questions, one correct submission, two untouched.
        let records = vec![record(1, true, 33), None, None];
        let ended = fixed_now() + Duration::seconds(90);
        let report = QuizReport::from_records(
            AttemptId::generate(),
            "safety",
            &records,
            fixed_now(),
            ended,
        )
        .unwrap();

        assert_eq!(report.total_questions(), 3);
        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.wrong_count(), 2);
        assert_eq!(report.total_score(), 33);
        assert_eq!(report.max_score(), 99);
        assert_eq!(report.accuracy_rate(), 33);
        assert_eq!(report.total_time_ms(), 90_000);
    }

    #[test]
    fn perfect_run_hits_full_score() {
        let records: Vec<_> = (0..10).map(|i| record(i, true, 10)).collect();
        let report = QuizReport::from_records(
            AttemptId::generate(),
            "safety",
            &records,
            fixed_now(),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(report.total_score(), 100);
        assert_eq!(report.accuracy_rate(), 100);
        assert_eq!(report.wrong_count(), 0);
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let err = QuizReport::from_records(
            AttemptId::generate(),
            "safety",
            &[],
            fixed_now(),
            fixed_now() - Duration::seconds(1),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidTimeRange));
    }

    #[test]
    fn tally_folds_outcomes() {
        let mut tally = BreakdownTally::default();
        tally.record(record(1, true, 10).as_ref());
        tally.record(record(2, false, 0).as_ref());
        tally.record(None);

        assert_eq!(tally.total, 3);
        assert_eq!(tally.answered, 2);
        assert_eq!(tally.correct, 1);
    }
}
