//! Error codes for the game hub API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and turn results.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the game hub API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General bad request error
    BadRequest,
    /// General validation error
    ValidationError,
    /// Required `sessionId` missing from a resume request
    MissingSessionId,
    /// Required `userInput` missing from a resume request
    MissingUserInput,
    /// Path names a game that does not exist
    UnknownGame,

    // Resource Not Found
    /// Session not present in the store (diagnostics lookups)
    SessionNotFound,
    /// General not found error
    NotFound,

    // Turn failures (reported inside turn results)
    /// Resume referenced a missing or expired session
    UnknownSession,
    /// Number game range collapsed; the player's answers contradict
    RangeExhausted,
    /// Text-generation collaborator failed
    CollaboratorFailure,
    /// Text-generation collaborator timed out
    CollaboratorTimeout,
    /// Stored session does not match the game it was dispatched to
    SessionCorrupted,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::MissingSessionId => "MISSING_SESSION_ID",
            Self::MissingUserInput => "MISSING_USER_INPUT",
            Self::UnknownGame => "UNKNOWN_GAME",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UnknownSession => "UNKNOWN_SESSION",
            Self::RangeExhausted => "RANGE_EXHAUSTED",
            Self::CollaboratorFailure => "COLLABORATOR_FAILURE",
            Self::CollaboratorTimeout => "COLLABORATOR_TIMEOUT",
            Self::SessionCorrupted => "SESSION_CORRUPTED",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
