//! Shared error types for the assessment engine.

use thiserror::Error;

use providers::ProviderError;
use quiz_core::model::ReportError;

/// Errors emitted by quiz sessions and the `QuizService` workflow.
///
/// Provider failures during question loading and validation are absorbed by
/// the fallback paths and never appear here; what remains are caller-side
/// invariant violations plus the one validation case that cannot be recovered
/// offline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for session")]
    Empty,

    #[error("session already completed")]
    Completed,

    #[error("no question at the current position")]
    NoCurrentQuestion,

    #[error("question {index} was already submitted")]
    AlreadySubmitted { index: usize },

    #[error("submission needs at least one selected option")]
    EmptySelection,

    #[error("answer could not be validated remotely and no local answer key is held")]
    ValidationUnavailable(#[source] ProviderError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
