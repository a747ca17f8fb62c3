use std::sync::Arc;
use std::time::Duration;

use game_hub::test_support::{
    create_test_app, create_test_state, FailingGenerator, ScriptedGenerator, SlowGenerator,
};
use serde_json::Value;

use crate::support::{post_turn, TurnBody};

const QUESTIONS: &str = "Here are your questions:
1. Is it something you can eat?
2) Is it found indoors?
- Is it made of wood?
Thanks!";

fn session_id(result: &Value) -> String {
    result["sessionId"]
        .as_str()
        .expect("sessionId should be present")
        .to_string()
}

#[actix_web::test]
async fn full_word_game_calls_the_generator_twice() {
    let generator = Arc::new(ScriptedGenerator::new([
        QUESTIONS,
        "Based on your answers, I think your word is desk",
    ]));
    let state = create_test_state()
        .with_generator(generator.clone())
        .build()
        .expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/word_game/play", &TurnBody::new()).await;
    let id = session_id(&start);
    assert!(start["prompt"]
        .as_str()
        .unwrap()
        .contains("apple, kiwi, desk, chair, car, pen"));
    assert_eq!(generator.calls(), 0);

    let first = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("I'm ready!"),
    )
    .await;
    assert_eq!(
        first["prompt"],
        "Question 1/5: Is it something you can eat?\n\nPlease answer: yes, no, or maybe"
    );
    assert_eq!(generator.calls(), 1);

    let expected = [
        "Question 2/5: Is it found indoors?",
        "Question 3/5: Is it made of wood?",
        "Question 4/5: Is it something commonly found at home?",
        "Question 5/5: Is it something commonly found at home?",
    ];
    for (answer, prefix) in ["no", "yes", "maybe", "y"].into_iter().zip(expected) {
        let result = post_turn(
            &app,
            "/api/word_game/resume",
            &TurnBody::new().session(&id).input(answer),
        )
        .await;
        assert!(
            result["prompt"].as_str().unwrap().starts_with(prefix),
            "expected {prefix}, got {}",
            result["prompt"]
        );
    }
    assert_eq!(generator.calls(), 1);

    let verify = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("n"),
    )
    .await;
    assert_eq!(
        verify["prompt"],
        "Based on your answers, I think your word is desk\n\nIs this correct? (yes/no)"
    );
    assert_eq!(generator.calls(), 2);

    let prompts = generator.prompts();
    assert!(prompts[1].contains("Q1: Is it something you can eat?\nA1: no"));
    assert!(prompts[1].contains("A5: no"));

    let done = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("yes"),
    )
    .await;
    assert_eq!(done["status"], "completed");
    assert_eq!(
        done["finalMessage"],
        "Excellent! I guessed your word correctly! Thanks for playing!"
    );
    assert_eq!(generator.calls(), 2);
    assert!(state.sessions().get(&id).await.is_err());
}

#[actix_web::test]
async fn ambiguous_verification_means_the_player_wins() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state).build().await.expect("create test app");

    let start = post_turn(&app, "/api/word_game/play", &TurnBody::new()).await;
    let id = session_id(&start);
    for answer in ["ready", "yes", "no", "maybe", "yes", "no"] {
        post_turn(
            &app,
            "/api/word_game/resume",
            &TurnBody::new().session(&id).input(answer),
        )
        .await;
    }

    let done = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("hmm, not sure"),
    )
    .await;
    assert_eq!(done["status"], "completed");
    assert_eq!(
        done["finalMessage"],
        "I didn't get it this time! You win! Thanks for playing!"
    );
}

#[actix_web::test]
async fn unparseable_answer_is_reprompted() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/word_game/play", &TurnBody::new()).await;
    let id = session_id(&start);
    post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;
    let before = state.sessions().get(&id).await.expect("stored");

    let result = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("purple"),
    )
    .await;
    assert_eq!(result["status"], "awaiting_input");
    let prompt = result["prompt"].as_str().unwrap();
    assert!(prompt.contains("'purple'"));
    assert!(prompt.contains("Question 1/5"));
    assert_eq!(state.sessions().get(&id).await.expect("stored"), before);
}

#[actix_web::test]
async fn resume_of_unknown_session_is_an_error() {
    let state = create_test_state().build().expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let result = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session("nope").input("ready"),
    )
    .await;

    assert_eq!(result["status"], "error");
    assert_eq!(result["errorCode"], "UNKNOWN_SESSION");
    assert_eq!(result["sessionId"], "nope");
    assert!(state.sessions().get("nope").await.is_err());
}

#[actix_web::test]
async fn generator_failure_ends_the_session() {
    let generator = Arc::new(FailingGenerator::new());
    let state = create_test_state()
        .with_generator(generator.clone())
        .build()
        .expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/word_game/play", &TurnBody::new()).await;
    let id = session_id(&start);

    let result = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;
    assert_eq!(result["status"], "error");
    assert_eq!(result["errorCode"], "COLLABORATOR_FAILURE");
    assert_eq!(result["sessionId"], id.as_str());
    assert_eq!(generator.calls(), 1);
    assert!(state.sessions().get(&id).await.is_err());
}

#[actix_web::test]
async fn generator_timeout_ends_the_session() {
    let state = create_test_state()
        .with_generator(Arc::new(SlowGenerator::new(Duration::from_secs(5))))
        .with_generator_timeout(Duration::from_millis(20))
        .build()
        .expect("create test state");
    let app = create_test_app(state.clone())
        .build()
        .await
        .expect("create test app");

    let start = post_turn(&app, "/api/word_game/play", &TurnBody::new()).await;
    let id = session_id(&start);

    let result = post_turn(
        &app,
        "/api/word_game/resume",
        &TurnBody::new().session(&id).input("ready"),
    )
    .await;
    assert_eq!(result["status"], "error");
    assert_eq!(result["errorCode"], "COLLABORATOR_TIMEOUT");
    assert!(state.sessions().get(&id).await.is_err());
}
