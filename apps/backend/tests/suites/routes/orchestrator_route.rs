use game_hub::test_support::{create_test_app, create_test_state};
use serde_json::Value;

use crate::support::{post_turn, TurnBody};

#[actix_web::test]
async fn declared_game_is_routed_first() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let result = post_turn(
        &app,
        "/api/route",
        &TurnBody::new()
            .declared("word_game")
            .input("let's guess a number"),
    )
    .await;
    assert_eq!(result["status"], "awaiting_input");
    assert_eq!(result["game"], "word_game");
}

#[actix_web::test]
async fn keywords_pick_the_game_when_nothing_is_declared() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let cases = [
        ("I'd like the word game", "word_game"),
        ("number please", "number_game"),
        ("hi there", "number_game"),
    ];
    for (input, expected) in cases {
        let result = post_turn(&app, "/api/route", &TurnBody::new().input(input)).await;
        assert_eq!(result["game"], expected, "input {input:?}");
    }
}

#[actix_web::test]
async fn resumed_sessions_ignore_keyword_drift() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let start = post_turn(&app, "/api/route", &TurnBody::new().declared("number_game")).await;
    let id = start["sessionId"].as_str().unwrap().to_string();

    let result = post_turn(
        &app,
        "/api/route",
        &TurnBody::new()
            .session(&id)
            .input("ready for the word game"),
    )
    .await;
    assert_eq!(result["game"], "number_game");
    assert_eq!(result["sessionId"], id.as_str());
    let prompt = result["prompt"].as_str().unwrap();
    assert!(prompt.contains("'ready'"), "{prompt}");

    let result = post_turn(
        &app,
        "/api/route",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;
    assert_eq!(result["prompt"], "Is your number 25? (yes/no)");
}

#[actix_web::test]
async fn end_game_reports_play_counts() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    post_turn(&app, "/api/word_game/play", &TurnBody::new()).await;
    let active = state.sessions().active_sessions();

    let result: Value = post_turn(&app, "/api/route", &TurnBody::new().input("quit")).await;
    assert_eq!(result["status"], "completed");
    assert!(result.get("sessionId").is_none());
    let message = result["finalMessage"].as_str().unwrap();
    assert!(message.contains("Number Guessing Game 2 time(s)"));
    assert!(message.contains("Word Guessing Game 1 time(s)"));

    assert_eq!(state.sessions().active_sessions(), active);
}
