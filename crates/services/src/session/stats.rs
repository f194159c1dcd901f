//! On-demand statistics over a session's committed records.
//!
//! Nothing here is cached; every call recomputes from the record slots so the
//! numbers can never go stale under navigation or resets.

use std::collections::BTreeMap;

use quiz_core::model::BreakdownTally;

use super::state::QuizSession;

/// Live mid-session counters, before finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub total_questions: usize,
    pub answered_count: usize,
    pub correct_count: usize,
    pub current_score: u32,
    pub current_index: usize,
}

/// Point-in-time counters for an in-flight session.
#[must_use]
pub fn snapshot(session: &QuizSession) -> SessionSnapshot {
    let correct_count = session
        .records()
        .iter()
        .flatten()
        .filter(|r| r.is_correct())
        .count();

    SessionSnapshot {
        total_questions: session.total_questions(),
        answered_count: session.answered_count(),
        correct_count,
        current_score: session.total_score(),
        current_index: session.current_index(),
    }
}

/// Tally per distinct question category.
///
/// Every category in the question set appears, even when nothing in it was
/// answered yet.
#[must_use]
pub fn category_breakdown(session: &QuizSession) -> BTreeMap<String, BreakdownTally> {
    let mut stats: BTreeMap<String, BreakdownTally> = BTreeMap::new();
    for (question, record) in session.questions().iter().zip(session.records()) {
        stats
            .entry(question.category().to_owned())
            .or_default()
            .record(record.as_ref());
    }
    stats
}

/// Tally per difficulty level present in the question set.
#[must_use]
pub fn difficulty_breakdown(session: &QuizSession) -> BTreeMap<u8, BreakdownTally> {
    let mut stats: BTreeMap<u8, BreakdownTally> = BTreeMap::new();
    for (question, record) in session.questions().iter().zip(session.records()) {
        stats
            .entry(question.difficulty())
            .or_default()
            .record(record.as_ref());
    }
    stats
}
