//! Game-level error type used by the state machines and the orchestrator.
//!
//! This error type is HTTP-agnostic. Every variant is terminal for the
//! session it occurred in: the orchestrator deletes the session and reports
//! the failure inside the turn result. Malformed player input is not an
//! error; it is the `StepOutcome::Invalid` outcome.

use thiserror::Error;

use crate::domain::session::{GameKind, WaitingFor};
use crate::errors::ErrorCode;
use crate::generator::GenerateError;

#[derive(Debug, Error)]
pub enum GameError {
    /// Binary search narrowed to an empty range.
    #[error("range exhausted (low {low} > high {high}); the answers were inconsistent")]
    RangeExhausted { low: i32, high: i32 },

    /// The text-generation collaborator failed or timed out.
    #[error("text generation failed: {0}")]
    Collaborator(#[from] GenerateError),

    /// A stored session does not fit the state machine it was routed to.
    #[error("{game} cannot resume from {waiting_for}: {detail}")]
    Corrupted {
        game: GameKind,
        waiting_for: WaitingFor,
        detail: String,
    },
}

impl GameError {
    pub fn corrupted(game: GameKind, waiting_for: WaitingFor, detail: impl Into<String>) -> Self {
        Self::Corrupted {
            game,
            waiting_for,
            detail: detail.into(),
        }
    }

    /// Error code surfaced in the turn result.
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::RangeExhausted { .. } => ErrorCode::RangeExhausted,
            GameError::Collaborator(GenerateError::Timeout(_)) => ErrorCode::CollaboratorTimeout,
            GameError::Collaborator(_) => ErrorCode::CollaboratorFailure,
            GameError::Corrupted { .. } => ErrorCode::SessionCorrupted,
        }
    }

    /// Player-facing message for the failed turn.
    pub fn player_message(&self) -> String {
        match self {
            GameError::RangeExhausted { .. } => {
                "Something went wrong with the range. Please make sure you chose a number \
                 between 1 and 50 and answered consistently. Let's start over!"
                    .to_string()
            }
            GameError::Collaborator(_) => {
                "I couldn't think of anything just now. Please start a new game.".to_string()
            }
            GameError::Corrupted { .. } => {
                "This game can no longer continue. Please start a new game.".to_string()
            }
        }
    }
}
