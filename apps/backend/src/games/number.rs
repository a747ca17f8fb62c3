//! Number game: the server guesses a number between 1 and 50 by binary search.
//!
//! Ready -> YesNo ("is it mid?") -> on "no" HigherLower -> YesNo with a
//! narrowed range -> ... -> Done. `guess_count` counts questions asked, i.e.
//! transitions into YesNo. An empty range means the player contradicted
//! themselves and is reported as `GameError::RangeExhausted`.

use async_trait::async_trait;

use super::{normalize_input, retry_prompt, StepOutcome, SuspendableGame, Suspension};
use crate::domain::session::{GameKind, NumberPayload, Payload, WaitingFor};
use crate::errors::GameError;

pub const LOWEST: i32 = 1;
pub const HIGHEST: i32 = 50;

pub const START_PROMPT: &str =
    "Great! Think of a number between 1 and 50, then say 'ready' when you're prepared!";

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberGame;

impl NumberGame {
    pub fn new() -> Self {
        Self
    }
}

/// Fresh payload covering the whole range.
pub fn initial_payload() -> NumberPayload {
    NumberPayload {
        low: LOWEST,
        high: HIGHEST,
        guess_count: 0,
        history: Vec::new(),
    }
}

pub fn start() -> Suspension {
    Suspension {
        payload: Payload::NumberGame(initial_payload()),
        waiting_for: WaitingFor::Ready,
        prompt: START_PROMPT.to_string(),
    }
}

/// Integer floor midpoint of the current range.
pub fn midpoint(payload: &NumberPayload) -> i32 {
    (payload.low + payload.high).div_euclid(2)
}

pub fn question_prompt(mid: i32) -> String {
    format!("Is your number {mid}? (yes/no)")
}

pub fn higher_lower_prompt(mid: i32) -> String {
    format!("Is your number higher or lower than {mid}? (higher/lower)")
}

fn success_message(mid: i32, guesses: u32) -> String {
    let noun = if guesses == 1 { "guess" } else { "guesses" };
    format!("Excellent! I guessed your number ({mid}) correctly in {guesses} {noun}! Thanks for playing!")
}

/// Advance the number game by one answer.
pub fn step(
    payload: &NumberPayload,
    waiting_for: WaitingFor,
    input: &str,
) -> Result<StepOutcome, GameError> {
    if payload.low > payload.high {
        return Err(GameError::RangeExhausted {
            low: payload.low,
            high: payload.high,
        });
    }

    let answer = normalize_input(input);
    let mid = midpoint(payload);

    match waiting_for {
        WaitingFor::Ready => match answer.as_str() {
            "ready" => Ok(ask(payload.clone())),
            _ => Ok(StepOutcome::Invalid {
                retry_prompt: retry_prompt(input, "'ready'", START_PROMPT),
            }),
        },
        WaitingFor::YesNo => match answer.as_str() {
            "yes" => Ok(StepOutcome::Done {
                final_message: success_message(mid, payload.guess_count),
            }),
            "no" => {
                let mut next = payload.clone();
                next.history.push(format!("{mid}: no"));
                Ok(StepOutcome::Continue(Suspension {
                    payload: Payload::NumberGame(next),
                    waiting_for: WaitingFor::HigherLower,
                    prompt: higher_lower_prompt(mid),
                }))
            }
            _ => Ok(StepOutcome::Invalid {
                retry_prompt: retry_prompt(input, "'yes' or 'no'", &question_prompt(mid)),
            }),
        },
        WaitingFor::HigherLower => {
            let mut next = payload.clone();
            match answer.as_str() {
                "higher" => next.low = mid + 1,
                "lower" => next.high = mid - 1,
                _ => {
                    return Ok(StepOutcome::Invalid {
                        retry_prompt: retry_prompt(
                            input,
                            "'higher' or 'lower'",
                            &higher_lower_prompt(mid),
                        ),
                    })
                }
            }
            next.history.push(format!("{mid}: {answer}"));
            if next.low > next.high {
                return Err(GameError::RangeExhausted {
                    low: next.low,
                    high: next.high,
                });
            }
            Ok(ask(next))
        }
        other => Err(GameError::corrupted(
            GameKind::NumberGame,
            other,
            "not a number game question",
        )),
    }
}

/// Transition into YesNo: this is the only place a question is counted.
fn ask(mut payload: NumberPayload) -> StepOutcome {
    payload.guess_count += 1;
    let mid = midpoint(&payload);
    StepOutcome::Continue(Suspension {
        payload: Payload::NumberGame(payload),
        waiting_for: WaitingFor::YesNo,
        prompt: question_prompt(mid),
    })
}

#[async_trait]
impl SuspendableGame for NumberGame {
    fn kind(&self) -> GameKind {
        GameKind::NumberGame
    }

    fn start(&self) -> Suspension {
        start()
    }

    async fn step(
        &self,
        payload: &Payload,
        waiting_for: WaitingFor,
        input: &str,
    ) -> Result<StepOutcome, GameError> {
        match payload {
            Payload::NumberGame(number) => step(number, waiting_for, input),
            Payload::WordGame(_) => Err(GameError::corrupted(
                GameKind::NumberGame,
                waiting_for,
                "word game payload",
            )),
        }
    }
}
