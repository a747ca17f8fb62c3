//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerateError, TextGenerator};

/// Endpoint settings for [`HttpTextGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Full endpoint URL, e.g. `https://api.groq.com/openai/v1/chat/completions`.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub struct HttpTextGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl HttpTextGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerateError::Timeout(self.config.timeout)
            } else {
                GenerateError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status(status.as_u16()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Decode(e.to_string()))?;

        let text = extract_text(parsed)?;
        debug!(model = %self.config.model, chars = text.len(), "generation completed");
        Ok(text)
    }
}

fn extract_text(response: ChatResponse) -> Result<String, GenerateError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        Err(GenerateError::Empty)
    } else {
        Ok(content)
    }
}
