use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;

use providers::{AnswerValidator, Providers, QuestionQuery, QuestionSource};
use quiz_core::model::{AnswerKey, AnswerRecord, BreakdownTally, Question, QuizReport};
use quiz_core::{Clock, scoring};

use super::state::QuizSession;
use super::stats;
use super::validate::{self, ValidationPath};
use crate::error::QuizError;
use crate::fallback;

/// Questions per session, matching the remote endpoint's default batch.
pub const DEFAULT_SESSION_SIZE: usize = 10;

/// Caller-facing result of one submission, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub question: Question,
    pub selected: Vec<usize>,
    pub is_correct: bool,
    pub score: u32,
    /// Key revealed by the validator, for showing the right answer.
    pub correct_answer: Option<AnswerKey>,
    pub explanation: Option<String>,
    pub path: ValidationPath,
}

/// Final result of a finished attempt: the report plus breakdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub report: QuizReport,
    pub by_category: BTreeMap<String, BreakdownTally>,
    pub by_difficulty: BTreeMap<u8, BreakdownTally>,
}

/// Orchestrates question sourcing, submission, and finalization.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    validator: Arc<dyn AnswerValidator>,
    session_size: usize,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        validator: Arc<dyn AnswerValidator>,
    ) -> Self {
        Self {
            clock,
            questions,
            validator,
            session_size: DEFAULT_SESSION_SIZE,
        }
    }

    #[must_use]
    pub fn from_providers(clock: Clock, providers: Providers) -> Self {
        Self::new(clock, providers.questions, providers.validator)
    }

    #[must_use]
    pub fn with_session_size(mut self, session_size: usize) -> Self {
        self.session_size = session_size;
        self
    }

    /// Shuffle and cap a sourced batch. Applied to remote and fallback
    /// batches alike so session shape never betrays the source.
    fn arrange(&self, mut questions: Vec<Question>) -> Vec<Question> {
        questions.shuffle(&mut rng());
        questions.truncate(self.session_size);
        questions
    }

    /// Start a session for a category.
    ///
    /// Remote sourcing failures (including an empty batch) are absorbed by
    /// substituting the embedded fallback bank; they are logged, never
    /// surfaced.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` only if even the fallback bank yields no
    /// questions for the category.
    pub async fn start_session(&self, category: &str) -> Result<QuizSession, QuizError> {
        let query = QuestionQuery::new(category, self.session_size);
        let sourced = match self.questions.fetch_questions(&query).await {
            Ok(batch) if !batch.is_empty() => batch,
            Ok(_) => {
                tracing::warn!(category, "question source returned an empty batch, using fallback bank");
                fallback::questions(category)
            }
            Err(err) => {
                tracing::warn!(category, error = %err, "question source failed, using fallback bank");
                fallback::questions(category)
            }
        };

        let arranged = self.arrange(sourced);
        tracing::debug!(category, count = arranged.len(), "session questions arranged");
        QuizSession::new(category, arranged, self.clock.now())
    }

    /// Submit a selection for the session's current question.
    ///
    /// Validation is remote-first with local fallback; the committed record
    /// is write-once.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` on resubmission,
    /// `QuizError::EmptySelection` for a zero-option submission,
    /// `QuizError::NoCurrentQuestion` outside bounds, and
    /// `QuizError::ValidationUnavailable` when no validation path is left.
    pub async fn submit_current(
        &self,
        session: &mut QuizSession,
        selected: Vec<usize>,
    ) -> Result<SubmissionOutcome, QuizError> {
        session.ensure_can_submit(&selected)?;
        let question = session
            .current_question()
            .ok_or(QuizError::NoCurrentQuestion)?
            .clone();

        let judged = validate::judge(
            self.validator.as_ref(),
            &question,
            &selected,
            session.category(),
        )
        .await?;

        let score = scoring::score_submission(session.total_questions(), judged.is_correct);
        let record = AnswerRecord::new(
            question.id(),
            selected.clone(),
            judged.is_correct,
            score,
            self.clock.now(),
        );
        session.commit_answer(record)?;

        tracing::debug!(
            question_id = %question.id(),
            is_correct = judged.is_correct,
            score,
            path = ?judged.path,
            "answer committed"
        );

        Ok(SubmissionOutcome {
            question,
            selected,
            is_correct: judged.is_correct,
            score,
            correct_answer: judged.correct_answer,
            explanation: judged.explanation,
            path: judged.path,
        })
    }

    /// Finalize the attempt and compute the full result.
    ///
    /// The first call stamps the end time; repeated calls recompute the same
    /// result from the committed records without moving the stamp.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Report` if the report cannot be derived.
    pub fn finish(&self, session: &mut QuizSession) -> Result<QuizOutcome, QuizError> {
        let ended_at = session.finalize(self.clock.now());
        let report = QuizReport::from_records(
            session.attempt_id(),
            session.category(),
            session.records(),
            session.started_at(),
            ended_at,
        )?;

        Ok(QuizOutcome {
            report,
            by_category: stats::category_breakdown(session),
            by_difficulty: stats::difficulty_breakdown(session),
        })
    }
}
