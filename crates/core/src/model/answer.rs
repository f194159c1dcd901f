use chrono::{DateTime, Utc};

use crate::model::ids::QuestionId;

/// Committed answer for one question, immutable once created.
///
/// The selection keeps its submission order; correctness is always judged
/// set-wise, so the order carries no meaning beyond display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    question_id: QuestionId,
    selected: Vec<usize>,
    is_correct: bool,
    score: u32,
    submitted_at: DateTime<Utc>,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        selected: Vec<usize>,
        is_correct: bool,
        score: u32,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            question_id,
            selected,
            is_correct,
            score,
            submitted_at,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn record_keeps_submission_order() {
        let rec = AnswerRecord::new(QuestionId::new(7), vec![2, 0], true, 10, fixed_now());
        assert_eq!(rec.selected(), &[2, 0]);
        assert!(rec.is_correct());
        assert_eq!(rec.score(), 10);
    }
}
