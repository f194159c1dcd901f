//! Embedded fallback question bank.
//!
//! Used when the remote question source is unreachable. Unlike remote
//! questions, these carry their answer key so submissions stay scorable
//! offline. The caller shuffles and truncates the returned list exactly as it
//! would a remote batch, so a fallback session is indistinguishable in shape.

use quiz_core::model::{AnswerKey, Question, QuestionId, QuestionKind};

/// The category served when an unknown one is requested.
pub const DEFAULT_CATEGORY: &str = "safety";

#[allow(clippy::too_many_arguments)]
fn question(
    id: u64,
    kind: QuestionKind,
    difficulty: u8,
    category: &str,
    prompt: &str,
    options: &[&str],
    key: AnswerKey,
    explanation: &str,
) -> Question {
    Question::new(
        QuestionId::new(id),
        kind,
        difficulty,
        category,
        prompt,
        options.iter().map(|s| (*s).to_owned()).collect(),
        Some(key),
        Some(explanation.to_owned()),
    )
    .expect("embedded question bank entry is valid")
}

fn safety_bank() -> Vec<Question> {
    vec![
        question(
            1,
            QuestionKind::Single,
            2,
            "operation_safety",
            "Which safety measure is mandatory when working at height?",
            &[
                "Wearing a hard hat",
                "Fastening a safety harness",
                "Inspecting the work area",
                "All of the above",
            ],
            AnswerKey::Single(3),
            "Work at height requires a hard hat, a fastened harness, and an inspected work area together.",
        ),
        question(
            2,
            QuestionKind::Multiple,
            3,
            "equipment_safety",
            "Which items must be checked before using a power tool?",
            &[
                "Condition of the power cord",
                "Grounding connection",
                "Switch operation",
                "Housing integrity",
            ],
            AnswerKey::multiple([0, 1, 2, 3]),
            "Every listed item is part of the pre-use inspection for power tools.",
        ),
        question(
            3,
            QuestionKind::Boolean,
            1,
            "basic_safety",
            "A spotted hazard must be reported to safety personnel immediately.",
            &["True", "False"],
            AnswerKey::Single(0),
            "Immediate reporting of hazards is every employee's responsibility.",
        ),
        question(
            4,
            QuestionKind::Single,
            2,
            "fire_safety",
            "Which direction should you evacuate during a building fire?",
            &[
                "Upward",
                "Downward",
                "Whichever exit is closest",
                "Stay and wait for rescue",
            ],
            AnswerKey::Single(1),
            "Smoke and heat rise, so evacuating downward is the safer route.",
        ),
        question(
            5,
            QuestionKind::Single,
            3,
            "chemical_safety",
            "What is the most important rule for personal protective equipment when handling chemicals?",
            &[
                "Always wear goggles",
                "Always wear gloves",
                "Always wear a protective suit",
                "Match the equipment to the specific chemical",
            ],
            AnswerKey::Single(3),
            "Different chemicals call for different protection; the equipment must match the substance handled.",
        ),
        question(
            6,
            QuestionKind::Multiple,
            2,
            "workplace_safety",
            "Which practices keep a workplace safe?",
            &[
                "Keeping walkways clear",
                "Removing clutter promptly",
                "Storing tools properly",
                "Inspecting equipment regularly",
            ],
            AnswerKey::multiple([0, 1, 2, 3]),
            "Workplace safety depends on clear walkways, prompt cleanup, proper tool storage, and regular inspections.",
        ),
        question(
            7,
            QuestionKind::Boolean,
            1,
            "basic_safety",
            "Safety training is only required for new employees.",
            &["True", "False"],
            AnswerKey::Single(1),
            "Safety training is ongoing; all employees attend refreshers to keep their knowledge current.",
        ),
        question(
            8,
            QuestionKind::Single,
            2,
            "emergency_response",
            "What is the first priority after a workplace injury?",
            &[
                "Notify management",
                "Secure the scene",
                "Treat the injured person",
                "Investigate the cause",
            ],
            AnswerKey::Single(2),
            "Treating the injured person comes first; life safety takes priority over everything else.",
        ),
        question(
            9,
            QuestionKind::Multiple,
            3,
            "risk_assessment",
            "Which factors belong in a risk assessment?",
            &[
                "Hazard identification",
                "Likelihood of occurrence",
                "Severity of consequences",
                "Existing control measures",
            ],
            AnswerKey::multiple([0, 1, 2, 3]),
            "A risk assessment weighs hazards, likelihood, severity, and the controls already in place.",
        ),
        question(
            10,
            QuestionKind::Single,
            2,
            "safety_management",
            "Which statement best describes a sound workplace safety policy?",
            &[
                "Safety first",
                "Safety first, prevention foremost, comprehensive management",
                "Prevention and management only",
                "Safety is everyone's job",
            ],
            AnswerKey::Single(1),
            "An effective policy combines putting safety first, preventing incidents, and managing risk comprehensively.",
        ),
    ]
}

fn violation_bank() -> Vec<Question> {
    vec![
        question(
            11,
            QuestionKind::Single,
            2,
            "violation_identification",
            "Which of the following is a rule violation?",
            &[
                "Wearing a hard hat on site",
                "Entering a restricted area without authorization",
                "Using protective equipment as instructed",
                "Following the operating procedure",
            ],
            AnswerKey::Single(1),
            "Entering a restricted area without authorization is a typical violation and can cause serious incidents.",
        ),
        question(
            12,
            QuestionKind::Multiple,
            3,
            "violation_types",
            "Which of these count as common rule violations?",
            &[
                "Skipping protective equipment",
                "Issuing unsafe instructions",
                "Working against procedure",
                "Breaching work discipline",
            ],
            AnswerKey::multiple([0, 1, 2, 3]),
            "Violations include skipped protection, unsafe instructions, off-procedure work, and discipline breaches.",
        ),
        question(
            13,
            QuestionKind::Boolean,
            1,
            "violation_identification",
            "A shortcut that saves time is acceptable if no one gets hurt.",
            &["True", "False"],
            AnswerKey::Single(1),
            "Shortcuts around procedure are violations regardless of outcome; near misses are still violations.",
        ),
        question(
            14,
            QuestionKind::Single,
            2,
            "violation_reporting",
            "What should you do when you witness a coworker violating a safety rule?",
            &[
                "Ignore it if nothing happened",
                "Confront them aggressively",
                "Report it through the proper channel",
                "Wait for a supervisor to notice",
            ],
            AnswerKey::Single(2),
            "Witnessed violations are reported through the designated channel so they can be corrected.",
        ),
        question(
            15,
            QuestionKind::Multiple,
            2,
            "violation_consequences",
            "Which consequences can follow from rule violations?",
            &[
                "Personal injury",
                "Equipment damage",
                "Disciplinary action",
                "Production delays",
            ],
            AnswerKey::multiple([0, 1, 2, 3]),
            "Violations can lead to injury, damaged equipment, discipline, and delayed production alike.",
        ),
    ]
}

/// Returns the embedded bank for a category, answer keys included.
///
/// Unknown categories fall back to the safety bank so a session can always be
/// populated.
#[must_use]
pub fn questions(category: &str) -> Vec<Question> {
    match category {
        "violation" => violation_bank(),
        _ => safety_bank(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banks_carry_answer_keys() {
        for category in ["safety", "violation"] {
            let bank = questions(category);
            assert!(!bank.is_empty());
            assert!(bank.iter().all(|q| q.answer_key().is_some()));
            assert!(bank.iter().all(|q| q.explanation().is_some()));
        }
    }

    #[test]
    fn safety_bank_fills_a_full_session() {
        assert_eq!(questions("safety").len(), 10);
    }

    #[test]
    fn unknown_category_uses_default_bank() {
        assert_eq!(questions("unknown"), questions(DEFAULT_CATEGORY));
    }

    #[test]
    fn ids_are_unique_across_banks() {
        let mut ids: Vec<_> = questions("safety")
            .iter()
            .chain(questions("violation").iter())
            .map(|q| q.id())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }
}
