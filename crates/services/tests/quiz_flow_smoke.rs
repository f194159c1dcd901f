use std::sync::Arc;

use providers::InMemoryProvider;
use quiz_core::model::{AnswerKey, Question, QuestionId, QuestionKind};
use quiz_core::time::fixed_clock;
use services::{QuizError, QuizService, ValidationPath};

fn bank_question(id: u64, kind: QuestionKind, key: AnswerKey) -> Question {
    let options = match kind {
        QuestionKind::Boolean => vec!["True".into(), "False".into()],
        _ => vec!["A".into(), "B".into(), "C".into(), "D".into()],
    };
    Question::new(
        QuestionId::new(id),
        kind,
        1 + (id % 3) as u8,
        "operation_safety",
        format!("Question {id}"),
        options,
        Some(key),
        Some(format!("Explanation {id}")),
    )
    .unwrap()
}

fn ten_question_bank() -> Vec<Question> {
    (1..=10)
        .map(|id| match id % 3 {
            0 => bank_question(id, QuestionKind::Multiple, AnswerKey::multiple([0, 2])),
            1 => bank_question(id, QuestionKind::Single, AnswerKey::Single(1)),
            _ => bank_question(id, QuestionKind::Boolean, AnswerKey::Single(0)),
        })
        .collect()
}

fn correct_selection(key: &AnswerKey) -> Vec<usize> {
    match key {
        AnswerKey::Single(i) => vec![*i],
        AnswerKey::Multiple(set) => set.iter().copied().collect(),
    }
}

fn service(provider: &InMemoryProvider) -> QuizService {
    QuizService::new(
        fixed_clock(),
        Arc::new(provider.clone()),
        Arc::new(provider.clone()),
    )
}

#[tokio::test]
async fn perfect_remote_run_scores_one_hundred() {
    let provider = InMemoryProvider::new();
    provider.set_bank("operation_safety", ten_question_bank());
    let bank = ten_question_bank();
    let svc = service(&provider);

    let mut session = svc.start_session("operation_safety").await.unwrap();
    assert_eq!(session.total_questions(), 10);
    // Remote-sourced questions must not leak their key.
    assert!(session.questions().iter().all(|q| q.answer_key().is_none()));

    while !session.all_answered() {
        let id = session.current_question().unwrap().id();
        let key = bank
            .iter()
            .find(|q| q.id() == id)
            .and_then(Question::answer_key)
            .unwrap();
        let outcome = svc
            .submit_current(&mut session, correct_selection(key))
            .await
            .unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.path, ValidationPath::Remote);
        session.go_to_next();
    }

    let outcome = svc.finish(&mut session).unwrap();
    assert_eq!(outcome.report.total_score(), 100);
    assert_eq!(outcome.report.accuracy_rate(), 100);
    assert_eq!(outcome.report.wrong_count(), 0);
    assert_eq!(outcome.by_category["operation_safety"].correct, 10);
}

#[tokio::test]
async fn offline_session_falls_back_and_stays_scorable() {
    let provider = InMemoryProvider::new();
    provider.fail_questions(true);
    provider.fail_validation(true);
    let svc = service(&provider);

    let mut session = svc.start_session("safety").await.unwrap();
    assert_eq!(session.total_questions(), 10);
    // Fallback questions carry their key, so validation works offline.
    assert!(session.questions().iter().all(|q| q.answer_key().is_some()));

    let key = session
        .current_question()
        .and_then(Question::answer_key)
        .unwrap()
        .clone();
    let outcome = svc
        .submit_current(&mut session, correct_selection(&key))
        .await
        .unwrap();
    assert!(outcome.is_correct);
    assert_eq!(outcome.path, ValidationPath::LocalFallback);
    assert_eq!(session.total_score(), outcome.score);
}

#[tokio::test]
async fn resubmission_is_rejected_without_touching_state() {
    let provider = InMemoryProvider::new();
    provider.set_bank("operation_safety", ten_question_bank());
    let svc = service(&provider);

    let mut session = svc.start_session("operation_safety").await.unwrap();
    svc.submit_current(&mut session, vec![0]).await.unwrap();
    let score_before = session.total_score();
    let record_before = session.record(0).cloned().unwrap();

    let err = svc.submit_current(&mut session, vec![1]).await.unwrap_err();
    assert!(matches!(err, QuizError::AlreadySubmitted { index: 0 }));
    assert_eq!(session.total_score(), score_before);
    assert_eq!(session.record(0).cloned().unwrap(), record_before);
}

#[tokio::test]
async fn empty_selection_never_reaches_the_validator() {
    let provider = InMemoryProvider::new();
    provider.set_bank("operation_safety", ten_question_bank());
    // A broken validator proves the rejection happens before the round trip.
    provider.fail_validation(true);
    let svc = service(&provider);

    let mut session = svc.start_session("operation_safety").await.unwrap();
    let err = svc.submit_current(&mut session, vec![]).await.unwrap_err();
    assert!(matches!(err, QuizError::EmptySelection));
}

#[tokio::test]
async fn remote_question_with_dead_validator_is_transient_failure() {
    let provider = InMemoryProvider::new();
    provider.set_bank("operation_safety", ten_question_bank());
    let svc = service(&provider);

    // Questions fetched remotely (no key), then the validator goes away.
    let mut session = svc.start_session("operation_safety").await.unwrap();
    provider.fail_validation(true);

    let err = svc.submit_current(&mut session, vec![0]).await.unwrap_err();
    assert!(matches!(err, QuizError::ValidationUnavailable(_)));
    // Nothing was committed; the submission can be retried.
    assert!(!session.is_submitted(session.current_index()));

    provider.fail_validation(false);
    svc.submit_current(&mut session, vec![0]).await.unwrap();
    assert!(session.is_submitted(0));
}

#[tokio::test]
async fn finished_session_rejects_late_submissions() {
    let provider = InMemoryProvider::new();
    provider.fail_questions(true);
    provider.fail_validation(true);
    let svc = service(&provider).with_session_size(3);

    // Finish a fallback session without answering anything.
    let mut session = svc.start_session("safety").await.unwrap();
    let first = svc.finish(&mut session).unwrap();
    assert_eq!(first.report.correct_count(), 0);
    assert_eq!(first.report.total_score(), 0);

    // A late correct answer must bounce off the completed session.
    let key = session
        .current_question()
        .and_then(Question::answer_key)
        .unwrap()
        .clone();
    let err = svc
        .submit_current(&mut session, correct_selection(&key))
        .await
        .unwrap_err();
    assert!(matches!(err, QuizError::Completed));
    assert!(!session.reset_to_question(0));

    // Finishing again reproduces the identical report, not a drifted one.
    let again = svc.finish(&mut session).unwrap();
    assert_eq!(again.report, first.report);
}

#[tokio::test]
async fn partial_attempt_counts_unanswered_as_wrong() {
    let provider = InMemoryProvider::new();
    provider.fail_questions(true);
    provider.fail_validation(true);
    let svc = service(&provider).with_session_size(3);

    let mut session = svc.start_session("violation").await.unwrap();
    assert_eq!(session.total_questions(), 3);

    // Answer only the first question, correctly.
    let key = session
        .current_question()
        .and_then(Question::answer_key)
        .unwrap()
        .clone();
    svc.submit_current(&mut session, correct_selection(&key))
        .await
        .unwrap();

    let outcome = svc.finish(&mut session).unwrap();
    assert_eq!(outcome.report.correct_count(), 1);
    // Unanswered questions count as wrong at finalization by policy.
    assert_eq!(outcome.report.wrong_count(), 2);
    assert_eq!(outcome.report.total_score(), 33);
    assert_eq!(outcome.report.max_score(), 99);

    // Finishing again keeps the first end stamp and the same numbers.
    let ended_at = outcome.report.ended_at();
    let again = svc.finish(&mut session).unwrap();
    assert_eq!(again.report.ended_at(), ended_at);
    assert_eq!(again.report, outcome.report);
}
