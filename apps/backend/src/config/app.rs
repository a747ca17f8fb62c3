//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::generator::GeneratorConfig;
use crate::middleware::cors::parse_origins;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 900;
const DEFAULT_GENERATOR_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_GENERATOR_MODEL: &str = "llama3-8b-8192";
const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,

    // Sessions
    pub session_idle_timeout: Duration,

    // Text generation
    pub generator: GeneratorConfig,
}

impl Config {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let session_idle_timeout = Duration::from_secs(positive_secs(
            "SESSION_IDLE_TIMEOUT_SECS",
            var("SESSION_IDLE_TIMEOUT_SECS"),
            DEFAULT_IDLE_TIMEOUT_SECS,
        )?);

        let generator_timeout = Duration::from_secs(positive_secs(
            "GENERATOR_TIMEOUT_SECS",
            var("GENERATOR_TIMEOUT_SECS"),
            DEFAULT_GENERATOR_TIMEOUT_SECS,
        )?);

        let endpoint = var("GENERATOR_URL").unwrap_or_else(|| DEFAULT_GENERATOR_URL.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AppError::config(format!(
                "GENERATOR_URL must be an http(s) URL, got '{endpoint}'"
            )));
        }

        let generator = GeneratorConfig {
            endpoint,
            model: var("GENERATOR_MODEL").unwrap_or_else(|| DEFAULT_GENERATOR_MODEL.to_string()),
            api_key: var("GENERATOR_API_KEY"),
            timeout: generator_timeout,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Config {
            host,
            port,
            cors_allowed_origins,
            session_idle_timeout,
            generator,
        })
    }
}

fn positive_secs(name: &str, raw: Option<String>, default: u64) -> Result<u64, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs >= 1 => Ok(secs),
        _ => Err(AppError::config(format!(
            "{name} must be a whole number of seconds >= 1, got '{raw}'"
        ))),
    }
}
