//! Property tests for the number game (pure state machine, no store).
//!
//! - A truthful player always converges on their number.
//! - Any player, truthful or not, is asked at most ceil(log2(50)) + 1
//!   questions before a guess lands or the range runs out.
//! - `low <= mid <= high` holds at every question.
//! - Unrecognised input never mutates state and always yields the same retry prompt.

use proptest::prelude::*;

use super::number::{midpoint, start, step, HIGHEST, LOWEST};
use super::{StepOutcome, Suspension};
use crate::domain::session::{NumberPayload, Payload, WaitingFor};
use crate::errors::GameError;

const MAX_QUESTIONS: u32 = 7;

fn payload(s: &Suspension) -> &NumberPayload {
    match &s.payload {
        Payload::NumberGame(p) => p,
        other => panic!("expected number payload, got {other:?}"),
    }
}

fn truthful_answer(target: i32, s: &Suspension) -> &'static str {
    let mid = midpoint(payload(s));
    match s.waiting_for {
        WaitingFor::Ready => "ready",
        WaitingFor::YesNo if mid == target => "yes",
        WaitingFor::YesNo => "no",
        WaitingFor::HigherLower if target > mid => "higher",
        WaitingFor::HigherLower => "lower",
        other => panic!("unexpected tag {other:?}"),
    }
}

fn not_vocabulary() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}".prop_filter("must not be an accepted token", |s| {
        !matches!(
            s.trim(),
            "ready" | "yes" | "no" | "higher" | "lower"
        )
    })
}

proptest! {
    #[test]
    fn prop_truthful_player_converges(target in LOWEST..=HIGHEST) {
        let mut current = start();
        let mut questions = 0u32;

        loop {
            if current.waiting_for == WaitingFor::YesNo {
                questions += 1;
                let p = payload(&current);
                let mid = midpoint(p);
                prop_assert!(p.low <= mid && mid <= p.high,
                    "low {} <= mid {} <= high {}", p.low, mid, p.high);
                prop_assert!(p.low <= target && target <= p.high);
                prop_assert_eq!(p.guess_count, questions);
            }

            let answer = truthful_answer(target, &current);
            match step(payload(&current), current.waiting_for, answer) {
                Ok(StepOutcome::Continue(next)) => current = next,
                Ok(StepOutcome::Done { final_message }) => {
                    let expected = format!("({target})");
                    prop_assert!(final_message.contains(&expected));
                    break;
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        prop_assert!(questions <= MAX_QUESTIONS, "asked {} questions", questions);
    }

    #[test]
    fn prop_any_answers_stay_in_range(
        answers in prop::collection::vec((any::<bool>(), any::<bool>()), 1..16),
    ) {
        let mut current = start();
        let mut questions = 0u32;
        let mut answers = answers.into_iter();

        loop {
            let answer = match current.waiting_for {
                WaitingFor::Ready => "ready",
                WaitingFor::YesNo => {
                    questions += 1;
                    let p = payload(&current);
                    let mid = midpoint(p);
                    prop_assert!(p.low <= mid && mid <= p.high,
                        "low {} <= mid {} <= high {}", p.low, mid, p.high);
                    prop_assert!(LOWEST <= p.low && p.high <= HIGHEST);
                    prop_assert_eq!(p.guess_count, questions);

                    let Some((yes, _)) = answers.next() else { break };
                    if yes { "yes" } else { "no" }
                }
                WaitingFor::HigherLower => {
                    let Some((_, higher)) = answers.next() else { break };
                    if higher { "higher" } else { "lower" }
                }
                other => panic!("unexpected tag {other:?}"),
            };

            match step(payload(&current), current.waiting_for, answer) {
                Ok(StepOutcome::Continue(next)) => current = next,
                Ok(StepOutcome::Done { .. }) => break,
                Err(GameError::RangeExhausted { low, high }) => {
                    prop_assert!(low > high);
                    break;
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        prop_assert!(questions <= MAX_QUESTIONS, "asked {} questions", questions);
    }

    #[test]
    fn prop_invalid_input_is_idempotent(
        target in LOWEST..=HIGHEST,
        steps in 0usize..8,
        garbage in not_vocabulary(),
    ) {
        let mut current = start();
        for _ in 0..steps {
            let answer = truthful_answer(target, &current);
            match step(payload(&current), current.waiting_for, answer) {
                Ok(StepOutcome::Continue(next)) => current = next,
                _ => break,
            }
        }

        let before = payload(&current).clone();
        let first = step(&before, current.waiting_for, &garbage);
        let second = step(&before, current.waiting_for, &garbage);

        match (first, second) {
            (
                Ok(StepOutcome::Invalid { retry_prompt: a }),
                Ok(StepOutcome::Invalid { retry_prompt: b }),
            ) => prop_assert_eq!(a, b),
            other => prop_assert!(false, "expected two Invalid outcomes, got {:?}", other),
        }
        prop_assert_eq!(payload(&current), &before);
    }
}
