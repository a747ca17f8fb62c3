//! Normalized result of one turn, returned to the caller and never stored.

use serde::Serialize;

use crate::domain::session::GameKind;
use crate::errors::ErrorCode;

/// Wire status of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    AwaitingInput,
    Completed,
    Error,
}

/// `prompt` is present iff `status == AwaitingInput`; `final_message` iff
/// `status == Completed`; `error`/`error_code` iff `status == Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameKind>,
    pub status: TurnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl TurnResult {
    pub fn awaiting(session_id: impl Into<String>, game: GameKind, prompt: String) -> Self {
        Self {
            session_id: Some(session_id.into()),
            game: Some(game),
            status: TurnStatus::AwaitingInput,
            prompt: Some(prompt),
            final_message: None,
            error: None,
            error_code: None,
        }
    }

    pub fn completed(
        session_id: Option<String>,
        game: Option<GameKind>,
        final_message: String,
    ) -> Self {
        Self {
            session_id,
            game,
            status: TurnStatus::Completed,
            prompt: None,
            final_message: Some(final_message),
            error: None,
            error_code: None,
        }
    }

    pub fn failed(
        session_id: Option<String>,
        game: Option<GameKind>,
        code: ErrorCode,
        error: String,
    ) -> Self {
        Self {
            session_id,
            game,
            status: TurnStatus::Error,
            prompt: None,
            final_message: None,
            error: Some(error),
            error_code: Some(code),
        }
    }

    pub fn is_awaiting(&self) -> bool {
        self.status == TurnStatus::AwaitingInput
    }
}
