use std::time::Duration;

use game_hub::domain::{GameKind, TurnStatus};
use game_hub::test_support::create_test_state;

#[tokio::test(start_paused = true)]
async fn idle_sessions_expire_and_are_treated_as_unknown() {
    let state = create_test_state()
        .with_idle_timeout(Duration::from_secs(60))
        .build()
        .expect("create test state");
    let orchestrator = state.orchestrator();

    let word = orchestrator.play(GameKind::WordGame, None, None).await;
    let word_id = word.session_id.expect("session id");
    let number = orchestrator.play(GameKind::NumberGame, None, None).await;
    let number_id = number.session_id.expect("session id");

    tokio::time::advance(Duration::from_secs(59)).await;
    let kept = orchestrator
        .resume(GameKind::NumberGame, &number_id, "ready")
        .await;
    assert_eq!(kept.prompt.as_deref(), Some("Is your number 25? (yes/no)"));

    tokio::time::advance(Duration::from_secs(2)).await;

    // The word session idled past the timeout; the number session was touched.
    let expired = orchestrator
        .resume(GameKind::WordGame, &word_id, "ready")
        .await;
    assert_eq!(expired.status, TurnStatus::Error);
    assert_eq!(
        expired.error_code.map(|c| c.as_str()),
        Some("UNKNOWN_SESSION")
    );
    assert!(state.sessions().get(&number_id).await.is_ok());

    tokio::time::advance(Duration::from_secs(60)).await;
    assert!(state.sessions().get(&number_id).await.is_err());
    assert_eq!(state.sessions().active_sessions(), 0);
}

#[tokio::test(start_paused = true)]
async fn route_starts_fresh_when_the_session_expired() {
    let state = create_test_state()
        .with_idle_timeout(Duration::from_secs(30))
        .build()
        .expect("create test state");
    let orchestrator = state.orchestrator();

    let start = orchestrator
        .route(None, Some("number_game"), None)
        .await;
    let id = start.session_id.expect("session id");

    tokio::time::advance(Duration::from_secs(31)).await;

    let next = orchestrator
        .route(Some(&id), None, Some("ready for the word game"))
        .await;
    assert_eq!(next.status, TurnStatus::AwaitingInput);
    assert_eq!(next.game, Some(GameKind::WordGame));
    assert_ne!(next.session_id.as_deref(), Some(id.as_str()));
}

#[tokio::test(start_paused = true)]
async fn starting_a_session_sweeps_idle_ones() {
    let state = create_test_state()
        .with_idle_timeout(Duration::from_secs(10))
        .build()
        .expect("create test state");
    let orchestrator = state.orchestrator();

    for _ in 0..3 {
        orchestrator.play(GameKind::NumberGame, None, None).await;
    }
    assert_eq!(state.sessions().active_sessions(), 3);

    tokio::time::advance(Duration::from_secs(11)).await;
    orchestrator.play(GameKind::WordGame, None, None).await;

    assert_eq!(state.sessions().active_sessions(), 1);
}
