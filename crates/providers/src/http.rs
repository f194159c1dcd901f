use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{AnswerKey, Question, QuestionId, QuestionKind};

use crate::api::{
    AnswerValidator, ProviderError, QuestionQuery, QuestionSource, RemoteVerdict,
};

#[derive(Clone, Debug)]
pub struct QuizApiConfig {
    pub base_url: String,
}

impl QuizApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("QUIZ_API_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self { base_url })
    }
}

/// HTTP adapter for the question and validation endpoints.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: QuizApiConfig,
}

impl HttpQuizApi {
    #[must_use]
    pub fn new(config: QuizApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuestionSource for HttpQuizApi {
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, ProviderError> {
        let response = self
            .client
            .get(self.endpoint("questions"))
            .query(&[
                ("type", query.category.as_str()),
                ("count", &query.count.to_string()),
                ("random", &query.randomize.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: QuestionsResponse = response.json().await?;
        if !body.success {
            return Err(ProviderError::Rejected(
                body.error.unwrap_or_else(|| "question fetch failed".into()),
            ));
        }

        body.questions
            .into_iter()
            .map(QuestionDto::into_question)
            .collect()
    }
}

#[async_trait]
impl AnswerValidator for HttpQuizApi {
    async fn validate(
        &self,
        question_id: QuestionId,
        selected: &[usize],
        category: &str,
    ) -> Result<RemoteVerdict, ProviderError> {
        let payload = ValidateRequest {
            question_id,
            selected_answers: selected.to_vec(),
            quiz_type: category,
        };

        let response = self
            .client
            .post(self.endpoint("validate-answer"))
            .json(&payload)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: ValidateResponse = response.json().await?;
        if !body.success {
            return Err(ProviderError::Rejected(
                body.error.unwrap_or_else(|| "validation failed".into()),
            ));
        }

        let is_correct = body
            .is_correct
            .ok_or_else(|| ProviderError::Malformed("missing isCorrect".into()))?;
        let kind = body.question_type.as_deref().map(parse_kind).transpose()?;
        let correct_answer = body
            .correct_answer
            .map(|key| key.into_answer_key(kind))
            .transpose()?;

        Ok(RemoteVerdict {
            is_correct,
            correct_answer,
            explanation: body.explanation,
        })
    }
}

fn parse_kind(raw: &str) -> Result<QuestionKind, ProviderError> {
    match raw {
        "single" => Ok(QuestionKind::Single),
        "multiple" => Ok(QuestionKind::Multiple),
        "boolean" => Ok(QuestionKind::Boolean),
        other => Err(ProviderError::Malformed(format!(
            "unknown question type {other:?}"
        ))),
    }
}

//
// ─── WIRE TYPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    question_id: QuestionId,
    selected_answers: Vec<usize>,
    quiz_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    success: bool,
    error: Option<String>,
    is_correct: Option<bool>,
    correct_answer: Option<AnswerKeyDto>,
    explanation: Option<String>,
    question_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    success: bool,
    error: Option<String>,
    #[serde(default)]
    questions: Vec<QuestionDto>,
}

/// The key arrives as a bare index for single/boolean questions and as an
/// index array for multiple-choice ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerKeyDto {
    Single(usize),
    Multiple(Vec<usize>),
}

impl AnswerKeyDto {
    fn into_answer_key(self, kind: Option<QuestionKind>) -> Result<AnswerKey, ProviderError> {
        match (self, kind) {
            (AnswerKeyDto::Single(index), _) => Ok(AnswerKey::Single(index)),
            (AnswerKeyDto::Multiple(indices), None | Some(QuestionKind::Multiple)) => {
                if indices.is_empty() {
                    return Err(ProviderError::Malformed("empty correctAnswer array".into()));
                }
                Ok(AnswerKey::multiple(indices))
            }
            (AnswerKeyDto::Multiple(_), Some(kind)) => Err(ProviderError::Malformed(format!(
                "array correctAnswer on a {kind:?} question"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDto {
    id: u64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default = "default_difficulty")]
    difficulty: u8,
    category: String,
    question: String,
    options: Vec<String>,
    // Present only in admin payloads; public question lists omit both.
    correct_answer: Option<AnswerKeyDto>,
    explanation: Option<String>,
}

fn default_difficulty() -> u8 {
    1
}

impl QuestionDto {
    fn into_question(self) -> Result<Question, ProviderError> {
        let kind = parse_kind(&self.kind)?;
        let answer_key = self
            .correct_answer
            .map(|key| key.into_answer_key(Some(kind)))
            .transpose()?;

        Question::new(
            QuestionId::new(self.id),
            kind,
            self.difficulty,
            self.category,
            self.question,
            self.options,
            answer_key,
            self.explanation,
        )
        .map_err(|err| ProviderError::Malformed(err.to_string()))
    }
}
