use std::sync::Arc;

use async_trait::async_trait;
use dioxus::prelude::ReadableExt;
use storage::repository::{
    InMemoryRepository, ScoreRepository, SessionFlagsRepository, StorageError,
};
use trivia_core::model::ScoreRecord;
use trivia_core::time::fixed_now;

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_stores};
use crate::vm::QuizIntent;

async fn settle(harness: &mut ViewHarness) {
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_renders_start_form_and_rules() {
    let mut harness = setup_view_harness(ViewKind::Home);
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Enter your name"), "missing name input in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("60 seconds"), "missing rules in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_shows_completed_state() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .players
        .register("Ada Lovelace", "female")
        .await
        .unwrap();
    harness
        .repo
        .set_flag("quiz_completed", "true")
        .await
        .unwrap();

    settle(&mut harness).await;

    let html = harness.render();
    assert!(
        html.contains("You have already completed the quiz"),
        "missing completed card in {html}"
    );
    assert!(html.contains("View Results"), "missing results link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_first_question_and_full_countdown() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness
        .players
        .register("Ada Lovelace", "female")
        .await
        .unwrap();

    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 10"), "missing progress in {html}");
    assert!(html.contains("1:00"), "missing countdown in {html}");
    assert!(html.contains("0 answered"), "missing answered count in {html}");
    assert!(
        html.contains("percentage of people use AI"),
        "missing first question in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_requires_registration() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    settle(&mut harness).await;

    let html = harness.render();
    assert!(
        html.contains("Enter your name on the start screen first."),
        "missing registration hint in {html}"
    );
    assert!(html.contains("Go to start"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_drive_selection_navigation_and_countdown() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness
        .players
        .register("Ada Lovelace", "female")
        .await
        .unwrap();
    settle(&mut harness).await;

    let handles = harness.quiz_handles.clone().expect("quiz handles");
    let dispatch = handles.dispatch();

    dispatch.call(QuizIntent::Select(2));
    harness.drive();
    let html = harness.render();
    assert!(html.contains("1 answered"), "missing answered count in {html}");
    assert!(
        html.contains("option option--selected"),
        "missing selected option in {html}"
    );

    dispatch.call(QuizIntent::Next);
    harness.drive();
    let html = harness.render();
    assert!(html.contains("Question 2 of 10"), "next did not advance in {html}");

    // 50 ticks leave 10 seconds, the critical threshold.
    for _ in 0..50 {
        dispatch.call(QuizIntent::Tick);
    }
    harness.drive();
    let html = harness.render();
    assert!(html.contains("0:10"), "missing ticked countdown in {html}");
    assert!(
        html.contains("countdown--critical"),
        "missing critical class in {html}"
    );

    let vm = handles.vm();
    let guard = vm.read();
    let vm_value = guard.as_ref().expect("vm registered");
    assert_eq!(vm_value.answered_count(), 1);
    assert_eq!(vm_value.current_position(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Results);
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("No results found."), "missing empty state in {html}");
    assert!(html.contains("Back to Home"), "missing home button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_renders_stored_summary() {
    let mut harness = setup_view_harness(ViewKind::Results);
    harness
        .players
        .register("Ada Lovelace", "female")
        .await
        .unwrap();

    let mut session = harness.quizzes.start().await.unwrap();
    for position in 0..session.total_questions() {
        session.jump_to(position);
        let right = session.current_question().correct_option();
        let pick = if position < 6 { right } else { (right + 1) % 4 };
        session.select_answer(pick);
    }
    for _ in 0..15 {
        session.tick();
    }
    assert!(session.submit());
    harness.quizzes.finalize(&mut session).await.unwrap();

    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("60%"), "missing percentage in {html}");
    assert!(html.contains("Good effort!"), "missing headline in {html}");
    assert!(html.contains("0:15"), "missing elapsed time in {html}");
    assert!(html.contains("Play Again"), "missing play again in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_renders_podium_and_ranked_rows() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard);
    let seed = [
        ("Zero Score", 0_u32),
        ("Ada Lovelace", 5),
        ("Grace Hopper", 5),
        ("Alan Turing", 3),
        ("Joan Clarke", 2),
    ];
    for (name, score) in seed {
        let record = ScoreRecord::new(name, score, 10, "female").unwrap();
        harness.repo.append_score(&record, fixed_now()).await.unwrap();
    }

    settle(&mut harness).await;

    let html = harness.render();
    // Podium shows first names; the tie keeps submission order.
    assert!(html.contains("Ada"), "missing podium winner in {html}");
    assert!(html.contains("Grace"), "missing second place in {html}");
    assert!(html.contains("5 points"), "missing points label in {html}");
    // Below the podium: full name with overall rank.
    assert!(html.contains("#4"), "missing rank in {html}");
    assert!(html.contains("Joan Clarke"), "missing ranked row in {html}");
    // Zero scores never qualify.
    assert!(!html.contains("Zero Score"), "zero score leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard);
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("No scores yet"), "missing empty state in {html}");
}

struct FailingFlags;

#[async_trait]
impl SessionFlagsRepository for FailingFlags {
    async fn get_flag(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set_flag(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove_flag(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_renders_error_state() {
    let repo = InMemoryRepository::new();
    let scores: Arc<dyn ScoreRepository> = Arc::new(repo.clone());
    let flags: Arc<dyn SessionFlagsRepository> = Arc::new(FailingFlags);
    let mut harness = setup_view_harness_with_stores(ViewKind::Home, repo, scores, flags);
    settle(&mut harness).await;

    let html = harness.render();
    assert!(
        html.contains("Something went wrong"),
        "missing error state in {html}"
    );
}
