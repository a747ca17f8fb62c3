use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;
use crate::games::GameRegistry;
use crate::generator::{GeneratorConfig, HttpTextGenerator, TextGenerator};
use crate::services::orchestrator::TurnOrchestrator;
use crate::services::session_store::SessionStore;
use crate::services::stats::GameStats;
use crate::state::app_state::AppState;

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(900);
const DEFAULT_GENERATOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    generator: Option<Arc<dyn TextGenerator>>,
    generator_config: Option<GeneratorConfig>,
    idle_timeout: Duration,
    generator_timeout: Duration,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            generator: None,
            generator_config: None,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            generator_timeout: DEFAULT_GENERATOR_TIMEOUT,
        }
    }

    /// Take timeouts and the HTTP generator settings from `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.idle_timeout = config.session_idle_timeout;
        self.generator_timeout = config.generator.timeout;
        self.generator_config = Some(config.generator.clone());
        self
    }

    /// Use this generator instead of building the HTTP one.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_generator_timeout(mut self, generator_timeout: Duration) -> Self {
        self.generator_timeout = generator_timeout;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let generator: Arc<dyn TextGenerator> = match (self.generator, self.generator_config) {
            (Some(generator), _) => generator,
            (None, Some(config)) => Arc::new(HttpTextGenerator::new(config).map_err(|e| {
                AppError::config(format!("failed to build text generator client: {e}"))
            })?),
            (None, None) => {
                return Err(AppError::config(
                    "no text generator configured; call with_config or with_generator",
                ))
            }
        };

        let orchestrator = TurnOrchestrator::new(
            Arc::new(SessionStore::new(self.idle_timeout)),
            GameRegistry::new(generator, self.generator_timeout),
            Arc::new(GameStats::new()),
        );

        Ok(AppState::new(Arc::new(orchestrator)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
