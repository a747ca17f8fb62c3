//! Turn orchestration over the in-memory session store.

pub mod orchestrator;
pub mod router;
pub mod session_store;
pub mod stats;

pub use orchestrator::TurnOrchestrator;
pub use router::{resolve_route, Route};
pub use session_store::{SessionGuard, SessionStore, StoreError};
pub use stats::GameStats;
