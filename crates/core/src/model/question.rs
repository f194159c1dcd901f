use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur while constructing a question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("boolean questions need exactly two options, got {0}")]
    InvalidBooleanOptions(usize),

    #[error("answer key index {index} is out of bounds for {options} options")]
    KeyOutOfBounds { index: usize, options: usize },

    #[error("multiple-choice answer key must not be empty")]
    EmptyAnswerKey,

    #[error("answer key shape does not match question kind {kind:?}")]
    KeyKindMismatch { kind: QuestionKind },
}

//
// ─── QUESTION KIND ────────────────────────────────────────────────────────────
//

/// Answer cardinality of a question.
///
/// - `Single`: one correct option among several
/// - `Multiple`: a set of correct options, all required
/// - `Boolean`: true/false, two options, one correct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Single,
    Multiple,
    Boolean,
}

impl QuestionKind {
    /// Wire name used by the question API (`single` / `multiple` / `boolean`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Single => "single",
            QuestionKind::Multiple => "multiple",
            QuestionKind::Boolean => "boolean",
        }
    }
}

//
// ─── ANSWER KEY ───────────────────────────────────────────────────────────────
//

/// The authoritative correct answer for a question, typed per kind.
///
/// `Single` covers both single-choice and boolean questions; `Multiple` holds
/// the full required set. Index values point into the question's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    Single(usize),
    Multiple(BTreeSet<usize>),
}

impl AnswerKey {
    /// Builds a `Multiple` key from a list of indices, deduplicating.
    #[must_use]
    pub fn multiple<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self::Multiple(indices.into_iter().collect())
    }

    /// Largest option index referenced by this key.
    #[must_use]
    pub fn max_index(&self) -> usize {
        match self {
            AnswerKey::Single(i) => *i,
            AnswerKey::Multiple(set) => set.iter().next_back().copied().unwrap_or(0),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single quiz question with validated shape.
///
/// The answer key is optional: questions fetched from the remote source omit
/// it so the correct answer never reaches the client before submission, while
/// questions from the embedded fallback bank carry it for offline validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    difficulty: u8,
    category: String,
    prompt: String,
    options: Vec<String>,
    answer_key: Option<AnswerKey>,
    explanation: Option<String>,
}

impl Question {
    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the options list is too short, the key
    /// references an out-of-bounds option, a multiple-choice key is empty,
    /// or the key shape disagrees with the question kind.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        difficulty: u8,
        category: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer_key: Option<AnswerKey>,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        if kind == QuestionKind::Boolean && options.len() != 2 {
            return Err(QuestionError::InvalidBooleanOptions(options.len()));
        }

        if let Some(key) = &answer_key {
            match (kind, key) {
                (QuestionKind::Multiple, AnswerKey::Multiple(set)) => {
                    if set.is_empty() {
                        return Err(QuestionError::EmptyAnswerKey);
                    }
                }
                (QuestionKind::Single | QuestionKind::Boolean, AnswerKey::Single(_)) => {}
                _ => return Err(QuestionError::KeyKindMismatch { kind }),
            }
            let max = key.max_index();
            if max >= options.len() {
                return Err(QuestionError::KeyOutOfBounds {
                    index: max,
                    options: options.len(),
                });
            }
        }

        Ok(Self {
            id,
            kind,
            difficulty,
            category: category.into(),
            prompt: prompt.into(),
            options,
            answer_key,
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Authoritative key, present only for locally-sourced questions.
    #[must_use]
    pub fn answer_key(&self) -> Option<&AnswerKey> {
        self.answer_key.as_ref()
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
