use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quiz_core::answer_check;
use quiz_core::model::{Question, QuestionId};

use crate::api::{
    AnswerValidator, ProviderError, QuestionQuery, QuestionSource, RemoteVerdict,
};

/// In-memory provider implementing both contracts over an owned question
/// bank, for tests and prototyping.
///
/// The bank's questions keep their answer keys; `fetch_questions` strips them
/// the way the real endpoint does, while `validate` judges against them.
/// A switchable fail mode simulates an unreachable service so callers can
/// exercise their offline fallback paths.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    banks: Arc<Mutex<HashMap<String, Vec<Question>>>>,
    fail_questions: Arc<AtomicBool>,
    fail_validation: Arc<AtomicBool>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bank for a category.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_bank(&self, category: impl Into<String>, questions: Vec<Question>) {
        let mut guard = self.banks.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(category.into(), questions);
    }

    /// Make subsequent question fetches fail with `ProviderError::Unavailable`.
    pub fn fail_questions(&self, fail: bool) {
        self.fail_questions.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent validations fail with `ProviderError::Unavailable`.
    pub fn fail_validation(&self, fail: bool) {
        self.fail_validation.store(fail, Ordering::SeqCst);
    }

    fn find_question(&self, id: QuestionId, category: &str) -> Option<Question> {
        let guard = self.banks.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .get(category)
            .and_then(|bank| bank.iter().find(|q| q.id() == id))
            .cloned()
    }
}

#[async_trait]
impl QuestionSource for InMemoryProvider {
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, ProviderError> {
        if self.fail_questions.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable);
        }

        let guard = self.banks.lock().unwrap_or_else(|e| e.into_inner());
        let bank = guard.get(&query.category).ok_or(ProviderError::NotFound)?;

        // Public shape: same question, answer key withheld.
        bank.iter()
            .take(query.count)
            .map(|q| {
                Question::new(
                    q.id(),
                    q.kind(),
                    q.difficulty(),
                    q.category(),
                    q.prompt(),
                    q.options().to_vec(),
                    None,
                    None,
                )
                .map_err(|err| ProviderError::Malformed(err.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl AnswerValidator for InMemoryProvider {
    async fn validate(
        &self,
        question_id: QuestionId,
        selected: &[usize],
        category: &str,
    ) -> Result<RemoteVerdict, ProviderError> {
        if self.fail_validation.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable);
        }

        let question = self
            .find_question(question_id, category)
            .ok_or(ProviderError::NotFound)?;
        let key = question
            .answer_key()
            .ok_or_else(|| ProviderError::Malformed("bank question has no answer key".into()))?;

        Ok(RemoteVerdict {
            is_correct: answer_check::is_correct(key, selected),
            correct_answer: Some(key.clone()),
            explanation: question.explanation().map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerKey, QuestionKind};

    fn bank_question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            QuestionKind::Single,
            1,
            "basic_safety",
            "Report hazards immediately?",
            vec!["Yes".into(), "No".into()],
            Some(AnswerKey::Single(0)),
            Some("Hazards must be reported as soon as they are spotted.".into()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_strips_answer_keys() {
        let provider = InMemoryProvider::new();
        provider.set_bank("basic_safety", vec![bank_question(1), bank_question(2)]);

        let questions = provider
            .fetch_questions(&QuestionQuery::new("basic_safety", 10))
            .await
            .unwrap();

        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.answer_key().is_none()));
    }

    #[tokio::test]
    async fn validate_reveals_key_and_explanation() {
        let provider = InMemoryProvider::new();
        provider.set_bank("basic_safety", vec![bank_question(1)]);

        let verdict = provider
            .validate(QuestionId::new(1), &[0], "basic_safety")
            .await
            .unwrap();

        assert!(verdict.is_correct);
        assert_eq!(verdict.correct_answer, Some(AnswerKey::Single(0)));
        assert!(verdict.explanation.is_some());
    }

    #[tokio::test]
    async fn fail_mode_simulates_outage() {
        let provider = InMemoryProvider::new();
        provider.set_bank("basic_safety", vec![bank_question(1)]);
        provider.fail_questions(true);

        let err = provider
            .fetch_questions(&QuestionQuery::new("basic_safety", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable));
    }

    #[tokio::test]
    async fn unknown_question_is_not_found() {
        let provider = InMemoryProvider::new();
        provider.set_bank("basic_safety", vec![bank_question(1)]);

        let err = provider
            .validate(QuestionId::new(99), &[0], "basic_safety")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound));
    }
}
