//! Error handling for the game hub backend.

pub mod domain;
pub mod error_code;

pub use domain::GameError;
pub use error_code::ErrorCode;
