use std::sync::Arc;
use dioxus::prelude::ReadableExt;

use quiz_core::model::{QuestionKind, QuestionRecord, ResponseValue};
use services::QuizSettings;
use storage::repository::{InMemoryRepository, QuestionBankRepository, StorageError};

use super::test_harness::{setup_view_harness, setup_view_harness_with_bank, test_settings};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_intro_page() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("American History Quiz"), "missing title in {html}");
    assert!(html.contains("90 minutes"), "missing intro copy in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(!html.contains("quiz-timer"), "timer shown before start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_starts_with_timer_and_progress() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;

    harness.act(|handles| handles.dispatch().call(QuizIntent::Start));
    let html = harness.render();
    assert!(html.contains("Time left: 1:30:00"), "missing timer in {html}");
    assert!(html.contains("Question 1 of 6"), "missing progress in {html}");
    assert!(html.contains("Previous"), "missing navigation in {html}");
    assert!(html.contains("Next"), "missing navigation in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_graded_review() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;
    harness.act(|handles| handles.dispatch().call(QuizIntent::Start));

    let answers: Vec<(String, QuestionKind, Vec<String>)> = harness.act(|handles| {
        let vm = handles.vm();
        let guard = vm.read();
        let session = guard.as_ref().expect("quiz loaded").session();
        session
            .questions()
            .iter()
            .map(|question| {
                let correct = question
                    .correct_answer()
                    .map(|answer| answer.values().into_iter().map(str::to_string).collect())
                    .unwrap_or_default();
                (question.id().to_string(), question.kind(), correct)
            })
            .collect()
    });

    for (question_id, _kind, correct) in &answers {
        for choice in correct {
            harness.act(|handles| {
                handles.dispatch().call(QuizIntent::Choose {
                    question_id: question_id.clone(),
                    choice: choice.clone(),
                });
            });
        }
        harness.act(|handles| handles.dispatch().call(QuizIntent::Submit));
    }

    let html = harness.render();
    assert!(html.contains("Score: 6 / 6 (100%)"), "missing score in {html}");
    assert!(html.contains("color: green"), "missing verdict colour in {html}");
    assert!(!html.contains("Time left"), "timer still shown in {html}");
    assert!(!html.contains("quiz-nav"), "navigation still shown in {html}");

    let stored = harness.act(|handles| {
        let vm = handles.vm();
        let guard = vm.read();
        let session = guard.as_ref().expect("quiz loaded").session();
        session.answer(&answers[0].0).cloned()
    });
    let expected = match answers[0].1 {
        QuestionKind::SingleSelect => ResponseValue::Single(answers[0].2[0].clone()),
        QuestionKind::MultiSelect => ResponseValue::Multiple(answers[0].2.clone()),
    };
    assert_eq!(stored, Some(expected));
}

struct FailingBank;

#[async_trait::async_trait]
impl QuestionBankRepository for FailingBank {
    async fn fetch_records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_stays_loading_when_fetch_fails() {
    let mut harness = setup_view_harness_with_bank(Arc::new(FailingBank), test_settings());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Loading questions..."), "missing loading text in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("Start Quiz"), "intro shown without a session in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_bank() {
    let mut harness = setup_view_harness_with_bank(
        Arc::new(InMemoryRepository::new(Vec::new())),
        QuizSettings::default().with_time_limit_secs(0),
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No questions are available"), "missing empty text in {html}");
}
