//! Text-generation collaborator.
//!
//! The word game asks an external model for its questions and its final
//! guess. That model sits behind [`TextGenerator`] so the game can be driven
//! by the HTTP client in production and by scripted fakes in tests.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use http::{GeneratorConfig, HttpTextGenerator};

/// Errors that can occur while generating text.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("generator returned HTTP {0}")]
    Status(u16),
    #[error("could not decode generator response: {0}")]
    Decode(String),
    #[error("generator returned no text")]
    Empty,
}

/// Given a prompt, return free text. One request, one response; no streaming.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Run one generation bounded by `limit`.
pub async fn generate_with_timeout(
    generator: &dyn TextGenerator,
    prompt: &str,
    limit: Duration,
) -> Result<String, GenerateError> {
    match tokio::time::timeout(limit, generator.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(GenerateError::Timeout(limit)),
    }
}
