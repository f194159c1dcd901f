use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::model::{AttemptId, QuestionId};

use super::state::QuizSession;

/// Serializable snapshot of an attempt for the analytics boundary.
///
/// This is intentionally **not** a UI view-model: answer keys and
/// explanations are left out, only what the attempt produced is exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizExport {
    pub attempt_id: AttemptId,
    pub category: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub total_score: u32,
    pub answers: Vec<ExportedAnswer>,
}

/// One question's outcome within an export; `selected` is empty and
/// `submitted_at` absent for questions never submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedAnswer {
    pub question_id: QuestionId,
    pub category: String,
    pub difficulty: u8,
    pub selected: Vec<usize>,
    pub is_correct: Option<bool>,
    pub score: u32,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl QuizExport {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let answers = session
            .questions()
            .iter()
            .zip(session.records())
            .map(|(question, slot)| ExportedAnswer {
                question_id: question.id(),
                category: question.category().to_owned(),
                difficulty: question.difficulty(),
                selected: slot.as_ref().map(|r| r.selected().to_vec()).unwrap_or_default(),
                is_correct: slot.as_ref().map(|r| r.is_correct()),
                score: slot.as_ref().map_or(0, |r| r.score()),
                submitted_at: slot.as_ref().map(|r| r.submitted_at()),
            })
            .collect();

        Self {
            attempt_id: session.attempt_id(),
            category: session.category().to_owned(),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            total_score: session.total_score(),
            answers,
        }
    }
}
