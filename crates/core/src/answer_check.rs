//! Local answer-equality rule.
//!
//! This is the canonical correctness policy: the remote validator applies the
//! same rule against its authoritative key, and the engine applies it here
//! when the remote call fails and the held question carries its own key.

use std::collections::BTreeSet;

use crate::model::AnswerKey;

/// Judge a selection against an answer key.
///
/// - `Multiple`: correct iff the selection and the key are equal as sets.
///   Order is irrelevant and duplicate selections carry no meaning.
/// - `Single`: correct iff exactly one option was selected and it matches.
///   Any extra selection invalidates the answer regardless of content.
#[must_use]
pub fn is_correct(key: &AnswerKey, selected: &[usize]) -> bool {
    match key {
        AnswerKey::Single(expected) => selected.len() == 1 && selected[0] == *expected,
        AnswerKey::Multiple(expected) => {
            let submitted: BTreeSet<usize> = selected.iter().copied().collect();
            submitted == *expected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_matches_exactly_one() {
        let key = AnswerKey::Single(1);
        assert!(is_correct(&key, &[1]));
        assert!(!is_correct(&key, &[0]));
        assert!(!is_correct(&key, &[]));
    }

    #[test]
    fn extra_selection_invalidates_single() {
        // Even when the correct option is among the picks.
        let key = AnswerKey::Single(1);
        assert!(!is_correct(&key, &[0, 1]));
        assert!(!is_correct(&key, &[1, 1]));
    }

    #[test]
    fn multiple_is_order_independent() {
        let key = AnswerKey::multiple([0, 2]);
        assert!(is_correct(&key, &[2, 0]));
        assert!(is_correct(&key, &[0, 2]));
    }

    #[test]
    fn multiple_rejects_subset_superset_and_wrong_element() {
        let key = AnswerKey::multiple([0, 2]);
        assert!(!is_correct(&key, &[0]));
        assert!(!is_correct(&key, &[0, 1, 2]));
        assert!(!is_correct(&key, &[0, 1]));
        assert!(!is_correct(&key, &[]));
    }

    #[test]
    fn duplicate_selections_collapse() {
        let key = AnswerKey::multiple([0, 2]);
        assert!(is_correct(&key, &[0, 2, 0]));
    }
}
