//! Deterministic scoring policy.
//!
//! Every question is worth an equal share of a 100-point scale, rounded to
//! the nearest integer per question. For question counts that do not divide
//! 100 evenly the achievable maximum drifts slightly from 100 (e.g. 3
//! questions score 33 each, max 99). Downstream pass thresholds are stated
//! in absolute points, so the drift is kept, not corrected.

/// Points earned by one correct answer in a session of `total_questions`.
///
/// Returns 0 for an empty session.
#[must_use]
pub fn points_per_question(total_questions: usize) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (100.0 / total_questions as f64).round() as u32
    }
}

/// Score for a single submission: the full per-question share when correct,
/// zero otherwise. No partial credit for multi-select questions.
#[must_use]
pub fn score_submission(total_questions: usize, is_correct: bool) -> u32 {
    if is_correct {
        points_per_question(total_questions)
    } else {
        0
    }
}

/// Maximum achievable total: every question answered correctly.
#[must_use]
pub fn max_score(total_questions: usize) -> u32 {
    let per_question = points_per_question(total_questions);
    u32::try_from(total_questions)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_questions_are_worth_ten_each() {
        assert_eq!(points_per_question(10), 10);
        assert_eq!(max_score(10), 100);
    }

    #[test]
    fn rounding_drift_is_preserved() {
        // 100/3 rounds to 33, so a perfect 3-question run tops out at 99.
        assert_eq!(points_per_question(3), 33);
        assert_eq!(max_score(3), 99);
        // 100/7 rounds to 14, max 98.
        assert_eq!(points_per_question(7), 14);
        assert_eq!(max_score(7), 98);
        // 100/8 rounds up to 13, max 104.
        assert_eq!(points_per_question(8), 13);
        assert_eq!(max_score(8), 104);
    }

    #[test]
    fn incorrect_answers_score_zero() {
        assert_eq!(score_submission(10, false), 0);
        assert_eq!(score_submission(10, true), 10);
    }

    #[test]
    fn empty_session_scores_zero() {
        assert_eq!(points_per_question(0), 0);
        assert_eq!(max_score(0), 0);
    }
}
