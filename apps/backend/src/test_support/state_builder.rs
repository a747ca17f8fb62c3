use std::sync::Arc;
use std::time::Duration;

use crate::error::AppError;
use crate::generator::TextGenerator;
use crate::infra::state::build_state;
use crate::state::AppState;

use super::fake_generator::ScriptedGenerator;

/// Builder for test AppState instances wired to fake generators.
pub struct TestStateBuilder {
    generator: Arc<dyn TextGenerator>,
    idle_timeout: Duration,
    generator_timeout: Duration,
}

impl TestStateBuilder {
    /// Defaults to a generator scripted for a word game that guesses "apple".
    pub fn new() -> Self {
        Self {
            generator: Arc::new(ScriptedGenerator::for_word("apple")),
            idle_timeout: Duration::from_secs(600),
            generator_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = generator;
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
        build_state()
            .with_generator(self.generator)
            .with_idle_timeout(self.idle_timeout)
            .with_generator_timeout(self.generator_timeout)
            .build()
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new test state builder
///
/// # Example
/// ```rust
/// use game_hub::test_support::create_test_state;
///
/// let state = create_test_state().build().expect("test state");
/// assert_eq!(state.sessions().active_sessions(), 0);
/// ```
pub fn create_test_state() -> TestStateBuilder {
    TestStateBuilder::new()
}
