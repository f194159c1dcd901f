//! Two-step answer validation: remote first, local equality on failure.

use providers::{AnswerValidator, ProviderError};
use quiz_core::answer_check;
use quiz_core::model::{AnswerKey, Question};

use crate::error::QuizError;

/// Which path produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPath {
    Remote,
    LocalFallback,
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JudgedAnswer {
    pub is_correct: bool,
    pub correct_answer: Option<AnswerKey>,
    pub explanation: Option<String>,
    pub path: ValidationPath,
}

/// Judge a selection, remote first.
///
/// On any provider failure the held question's own key is consulted. Fallback
/// questions carry their key, so they stay scorable offline; remote-fetched
/// questions do not, and for those the failure is surfaced as
/// `ValidationUnavailable` for the caller to retry rather than guessed at.
///
/// # Errors
///
/// Returns `QuizError::ValidationUnavailable` when the remote call fails and
/// the question holds no answer key.
pub(crate) async fn judge(
    validator: &dyn AnswerValidator,
    question: &Question,
    selected: &[usize],
    category: &str,
) -> Result<JudgedAnswer, QuizError> {
    let failure: ProviderError = match validator
        .validate(question.id(), selected, category)
        .await
    {
        Ok(verdict) => {
            return Ok(JudgedAnswer {
                is_correct: verdict.is_correct,
                correct_answer: verdict.correct_answer,
                explanation: verdict.explanation,
                path: ValidationPath::Remote,
            });
        }
        Err(err) => err,
    };

    let Some(key) = question.answer_key() else {
        tracing::warn!(
            question_id = %question.id(),
            error = %failure,
            "remote validation failed with no local answer key"
        );
        return Err(QuizError::ValidationUnavailable(failure));
    };

    tracing::warn!(
        question_id = %question.id(),
        error = %failure,
        "remote validation failed, falling back to local answer key"
    );

    Ok(JudgedAnswer {
        is_correct: answer_check::is_correct(key, selected),
        correct_answer: Some(key.clone()),
        explanation: question.explanation().map(str::to_owned),
        path: ValidationPath::LocalFallback,
    })
}
