//! Game state machines.
//!
//! Each game is a transition function over its own payload: `start` produces
//! the first suspension point and `step` consumes one player answer and
//! returns the next suspension point, the end of the game, or a re-prompt.
//! Games never see the session store; they receive and return payload values.
//!
//! How to add a game:
//!
//! 1) Add a `GameKind` variant and a `Payload` variant for its state.
//! 2) Implement `SuspendableGame` for it in its own module.
//! 3) Register it in `GameRegistry::get`.

pub mod number;
pub mod registry;
pub mod word;

#[cfg(test)]
mod tests_props_number;

use async_trait::async_trait;

use crate::domain::session::{GameKind, Payload, WaitingFor};
use crate::errors::GameError;

pub use number::NumberGame;
pub use registry::GameRegistry;
pub use word::WordGame;

/// A suspension point: the state to persist and the question to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspension {
    pub payload: Payload,
    pub waiting_for: WaitingFor,
    pub prompt: String,
}

/// Result of feeding one answer into a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game advanced and is suspended at a new question.
    Continue(Suspension),
    /// The game finished.
    Done { final_message: String },
    /// The answer was not understood. State is unchanged; ask again.
    Invalid { retry_prompt: String },
}

/// The contract every game implements so the orchestrator can drive it one
/// suspension-to-suspension step at a time.
#[async_trait]
pub trait SuspendableGame: Send + Sync {
    fn kind(&self) -> GameKind;

    /// Initial suspension for a brand-new session.
    fn start(&self) -> Suspension;

    /// Feed one player answer into the stored state.
    ///
    /// `Err` is terminal for the session.
    async fn step(
        &self,
        payload: &Payload,
        waiting_for: WaitingFor,
        input: &str,
    ) -> Result<StepOutcome, GameError>;
}

/// Trim and lower-case player input for matching.
pub(crate) fn normalize_input(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Retry message shared by both games: echoes what was typed, names the
/// accepted tokens, then re-states the outstanding question.
pub(crate) fn retry_prompt(input: &str, accepted: &str, restated: &str) -> String {
    let typed = input.trim();
    if typed.is_empty() {
        format!("I didn't catch that. Please respond with {accepted}.\n\n{restated}")
    } else {
        format!("I didn't understand '{typed}'. Please respond with {accepted}.\n\n{restated}")
    }
}
