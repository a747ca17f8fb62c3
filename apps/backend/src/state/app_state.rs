use std::sync::Arc;

use crate::services::orchestrator::TurnOrchestrator;
use crate::services::session_store::SessionStore;
use crate::services::stats::GameStats;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<TurnOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<TurnOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    /// Read access for diagnostics and health; only the orchestrator writes.
    pub fn sessions(&self) -> &SessionStore {
        self.orchestrator.store()
    }

    pub fn stats(&self) -> &GameStats {
        self.orchestrator.stats()
    }
}
