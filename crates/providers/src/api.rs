use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use quiz_core::model::{AnswerKey, Question, QuestionId};

/// Errors surfaced by the remote question and validation providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("question not found")]
    NotFound,

    #[error("provider request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider unavailable")]
    Unavailable,
}

/// Parameters for a question fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    pub category: String,
    pub count: usize,
    pub randomize: bool,
}

impl QuestionQuery {
    #[must_use]
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
            randomize: true,
        }
    }
}

/// Verdict returned by the remote validation endpoint.
///
/// The remote side reveals the answer key and explanation only after a
/// submission, so both ride along with the correctness bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteVerdict {
    pub is_correct: bool,
    pub correct_answer: Option<AnswerKey>,
    pub explanation: Option<String>,
}

/// Contract for sourcing a session's question set.
///
/// Returned questions omit their answer key; the key stays server-side until
/// validation.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `query.count` questions for a category.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the provider cannot be reached or the
    /// response cannot be mapped to domain questions.
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, ProviderError>;
}

/// Contract for the authoritative answer check.
#[async_trait]
pub trait AnswerValidator: Send + Sync {
    /// Judge a selection against the server-held answer key.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failure, an unknown question id,
    /// or a malformed response.
    async fn validate(
        &self,
        question_id: QuestionId,
        selected: &[usize],
        category: &str,
    ) -> Result<RemoteVerdict, ProviderError>;
}

/// Aggregates both provider contracts behind trait objects for easy swapping.
#[derive(Clone)]
pub struct Providers {
    pub questions: Arc<dyn QuestionSource>,
    pub validator: Arc<dyn AnswerValidator>,
}

impl Providers {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionSource>, validator: Arc<dyn AnswerValidator>) -> Self {
        Self {
            questions,
            validator,
        }
    }
}
