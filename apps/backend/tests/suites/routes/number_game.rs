use actix_web::test;
use game_hub::test_support::{create_test_app, create_test_state};
use serde_json::Value;

use crate::common::assert_problem_details_structure;
use crate::support::{post_turn, post_turn_raw, TurnBody};

fn session_id(result: &Value) -> String {
    result["sessionId"]
        .as_str()
        .expect("sessionId should be present")
        .to_string()
}

#[actix_web::test]
async fn play_starts_a_number_game() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let result = post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;

    assert_eq!(result["status"], "awaiting_input");
    assert_eq!(result["game"], "number_game");
    assert_eq!(
        result["prompt"],
        "Great! Think of a number between 1 and 50, then say 'ready' when you're prepared!"
    );
    assert!(result.get("finalMessage").is_none());
    assert!(result.get("error").is_none());
}

#[actix_web::test]
async fn truthful_player_converges_on_27() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    let id = session_id(&start);

    let script = [
        ("ready", "Is your number 25? (yes/no)"),
        ("no", "Is your number higher or lower than 25? (higher/lower)"),
        ("higher", "Is your number 38? (yes/no)"),
        ("no", "Is your number higher or lower than 38? (higher/lower)"),
        ("lower", "Is your number 31? (yes/no)"),
        ("no", "Is your number higher or lower than 31? (higher/lower)"),
        ("lower", "Is your number 28? (yes/no)"),
        ("no", "Is your number higher or lower than 28? (higher/lower)"),
        ("lower", "Is your number 26? (yes/no)"),
        ("no", "Is your number higher or lower than 26? (higher/lower)"),
        ("higher", "Is your number 27? (yes/no)"),
    ];
    for (answer, expected_prompt) in script {
        let result = post_turn(
            &app,
            "/api/number_game/resume",
            &TurnBody::new().session(&id).input(answer),
        )
        .await;
        assert_eq!(result["status"], "awaiting_input", "after {answer}");
        assert_eq!(result["prompt"], expected_prompt, "after {answer}");
        assert_eq!(result["sessionId"], id.as_str());
    }

    let done = post_turn(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session(&id).input("Yes"),
    )
    .await;
    assert_eq!(done["status"], "completed");
    assert_eq!(
        done["finalMessage"],
        "Excellent! I guessed your number (27) correctly in 6 guesses! Thanks for playing!"
    );
    assert_eq!(done["sessionId"], id.as_str());
    assert!(done.get("prompt").is_none());

    assert!(state.sessions().get(&id).await.is_err());
}

#[actix_web::test]
async fn play_can_continue_an_existing_session() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let start = post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    let id = session_id(&start);

    let next = post_turn(
        &app,
        "/api/number_game/play",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;
    assert_eq!(next["sessionId"], id.as_str());
    assert_eq!(next["prompt"], "Is your number 25? (yes/no)");

    let restated = post_turn(
        &app,
        "/api/number_game/play",
        &TurnBody::new().session(&id),
    )
    .await;
    assert_eq!(restated["prompt"], "Is your number 25? (yes/no)");
}

#[actix_web::test]
async fn invalid_answer_reprompts_without_advancing() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    let id = session_id(&start);
    post_turn(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;
    let before = state.sessions().get(&id).await.expect("session stored");

    let first = post_turn(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session(&id).input("maybe"),
    )
    .await;
    let second = post_turn(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session(&id).input("maybe"),
    )
    .await;

    assert_eq!(first["status"], "awaiting_input");
    assert_eq!(first["prompt"], second["prompt"]);
    let prompt = first["prompt"].as_str().expect("retry prompt");
    assert!(prompt.contains("'maybe'"));
    assert!(prompt.contains("'yes' or 'no'"));
    assert!(prompt.ends_with("Is your number 25? (yes/no)"));

    assert_eq!(state.sessions().get(&id).await.expect("still stored"), before);
}

#[actix_web::test]
async fn contradictory_answers_fail_the_session() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    let id = session_id(&start);
    post_turn(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;

    let mut last = Value::Null;
    for _ in 0..10 {
        for answer in ["no", "higher"] {
            last = post_turn(
                &app,
                "/api/number_game/resume",
                &TurnBody::new().session(&id).input(answer),
            )
            .await;
            if last["status"] != "awaiting_input" {
                break;
            }
        }
        if last["status"] != "awaiting_input" {
            break;
        }
    }

    assert_eq!(last["status"], "error");
    assert_eq!(last["errorCode"], "RANGE_EXHAUSTED");
    assert_eq!(last["sessionId"], id.as_str());
    assert!(last["error"].as_str().unwrap().contains("start over"));
    assert!(state.sessions().get(&id).await.is_err());
}

#[actix_web::test]
async fn resume_of_unknown_session_starts_a_default_game() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let result = post_turn(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session("client-made-id").input("ready"),
    )
    .await;

    assert_eq!(result["status"], "awaiting_input");
    assert_eq!(result["sessionId"], "client-made-id");
    assert_eq!(result["prompt"], "Is your number 25? (yes/no)");
    assert!(state.sessions().get("client-made-id").await.is_ok());
}

#[actix_web::test]
async fn resume_requires_session_id_and_input() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let resp = post_turn_raw(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().input("ready"),
    )
    .await;
    assert_problem_details_structure(
        resp,
        400,
        "MISSING_SESSION_ID",
        "sessionId is required to resume",
    )
    .await;

    let resp = post_turn_raw(
        &app,
        "/api/number_game/resume",
        &TurnBody::new().session("abc"),
    )
    .await;
    assert_problem_details_structure(
        resp,
        400,
        "MISSING_USER_INPUT",
        "userInput is required to resume",
    )
    .await;
}

#[actix_web::test]
async fn snake_case_bodies_are_accepted() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let start = post_turn(&app, "/api/number_game/play", &TurnBody::new()).await;
    let id = session_id(&start);

    let req = test::TestRequest::post()
        .uri("/api/number_game/resume")
        .set_json(serde_json::json!({ "session_id": id, "user_input": "ready" }))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result["prompt"], "Is your number 25? (yes/no)");
}
