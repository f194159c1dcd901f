use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

use quiz_core::model::{AnswerRecord, AttemptId, Question};

use super::progress::SessionProgress;
use crate::error::QuizError;

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// One quiz attempt: a fixed question order, a movable cursor, draft answers,
/// and the committed answer records.
///
/// All mutation goes through the methods here. The two invariants the type
/// protects: a record slot is write-once, and `total_score` always equals the
/// sum of committed record scores.
pub struct QuizSession {
    attempt_id: AttemptId,
    category: String,
    questions: Vec<Question>,
    current: usize,
    drafts: HashMap<usize, Vec<usize>>,
    records: Vec<Option<AnswerRecord>>,
    total_score: u32,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over an already-arranged question list.
    ///
    /// `started_at` should come from the workflow clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are provided.
    pub fn new(
        category: impl Into<String>,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let records = vec![None; questions.len()];

        Ok(Self {
            attempt_id: AttemptId::generate(),
            category: category.into(),
            questions,
            current: 0,
            drafts: HashMap::new(),
            records,
            total_score: 0,
            started_at,
            ended_at: None,
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
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Committed record slots in question order; `None` means not submitted.
    #[must_use]
    pub fn records(&self) -> &[Option<AnswerRecord>] {
        &self.records
    }

    #[must_use]
    pub fn record(&self, index: usize) -> Option<&AnswerRecord> {
        self.records.get(index)?.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_submitted(&self, index: usize) -> bool {
        self.record(index).is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    /// True once every question has a committed record.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.answered_count() == self.questions.len()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Progress snapshot over committed records.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.answered_count();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = if total == 0 {
            0
        } else {
            (answered as f64 / total as f64 * 100.0).round() as u32
        };
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            percent,
        }
    }

    //
    // ─── DRAFTS ────────────────────────────────────────────────────────────────
    //

    /// Store or overwrite the draft selection for the current question.
    ///
    /// Has no effect once the current question has a committed record or the
    /// attempt is finalized; submission is final.
    pub fn save_draft(&mut self, selected: Vec<usize>) {
        if self.is_finalized() || self.is_submitted(self.current) {
            return;
        }
        self.drafts.insert(self.current, selected);
    }

    /// Draft selection for the current question, empty if none was saved.
    #[must_use]
    pub fn draft(&self) -> &[usize] {
        self.drafts
            .get(&self.current)
            .map_or(&[], Vec::as_slice)
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Move to the previous question. Returns whether the move occurred.
    pub fn go_to_previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Move to the next question. Returns whether the move occurred.
    pub fn go_to_next(&mut self) -> bool {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Jump to an arbitrary question. Returns whether the move occurred.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.questions.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    //
    // ─── COMMIT ────────────────────────────────────────────────────────────────
    //

    /// Check that a selection may be submitted for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` once the attempt is finalized,
    /// `QuizError::NoCurrentQuestion` outside bounds,
    /// `QuizError::AlreadySubmitted` when the slot is taken, and
    /// `QuizError::EmptySelection` for a zero-option submission. The empty
    /// check runs here so it rejects before any validator round trip.
    pub(crate) fn ensure_can_submit(&self, selected: &[usize]) -> Result<(), QuizError> {
        if self.is_finalized() {
            return Err(QuizError::Completed);
        }
        if self.current >= self.questions.len() {
            return Err(QuizError::NoCurrentQuestion);
        }
        if self.is_submitted(self.current) {
            return Err(QuizError::AlreadySubmitted {
                index: self.current,
            });
        }
        if selected.is_empty() {
            return Err(QuizError::EmptySelection);
        }
        Ok(())
    }

    /// Write the record for the current question and update the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` after finalization and
    /// `QuizError::AlreadySubmitted` if a record exists; the existing record
    /// and the score are left untouched either way.
    pub(crate) fn commit_answer(&mut self, record: AnswerRecord) -> Result<&AnswerRecord, QuizError> {
        if self.is_finalized() {
            return Err(QuizError::Completed);
        }
        if self.current >= self.questions.len() {
            return Err(QuizError::NoCurrentQuestion);
        }
        if self.records[self.current].is_some() {
            return Err(QuizError::AlreadySubmitted {
                index: self.current,
            });
        }

        self.total_score = self.total_score.saturating_add(record.score());
        self.drafts.remove(&self.current);
        self.records[self.current] = Some(record);
        self.records[self.current]
            .as_ref()
            .ok_or(QuizError::NoCurrentQuestion)
    }

    /// Clear all records from `index` onward, move the cursor there, and
    /// recompute the score from the remaining prefix. Returns whether the
    /// reset occurred; a finalized attempt is immutable and never resets.
    pub fn reset_to_question(&mut self, index: usize) -> bool {
        if self.is_finalized() || index >= self.questions.len() {
            return false;
        }
        self.current = index;
        for slot in &mut self.records[index..] {
            *slot = None;
        }
        self.total_score = self
            .records
            .iter()
            .flatten()
            .map(AnswerRecord::score)
            .sum();
        true
    }

    //
    // ─── FINALIZATION ──────────────────────────────────────────────────────────
    //

    /// Stamp the end of the attempt. The first stamp wins; repeated calls
    /// return it unchanged so results stay recomputable.
    pub fn finalize(&mut self, at: DateTime<Utc>) -> DateTime<Utc> {
        *self.ended_at.get_or_insert(at)
    }

    fn answers_where(&self, correct: bool) -> Vec<(usize, &Question, &AnswerRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let record = slot.as_ref()?;
                if record.is_correct() == correct {
                    Some((i, &self.questions[i], record))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Questions answered incorrectly, with their committed records.
    #[must_use]
    pub fn wrong_answers(&self) -> Vec<(usize, &Question, &AnswerRecord)> {
        self.answers_where(false)
    }

    /// Questions answered correctly, with their committed records.
    #[must_use]
    pub fn correct_answers(&self) -> Vec<(usize, &Question, &AnswerRecord)> {
        self.answers_where(true)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("attempt_id", &self.attempt_id)
            .field("category", &self.category)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answered_count())
            .field("total_score", &self.total_score)
            .field("started_at", &self.started_at)
            .field("ended_at", &self.ended_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
