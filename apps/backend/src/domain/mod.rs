//! Domain layer: session records and turn results.

pub mod session;
pub mod turn;

pub use session::{GameKind, Payload, Session, SessionStatus, WaitingFor};
pub use turn::{TurnResult, TurnStatus};
