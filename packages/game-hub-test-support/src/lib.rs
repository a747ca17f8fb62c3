//! Game hub test support utilities
//!
//! Shared helpers for the backend's integration test binaries. Currently this
//! is the unified logging bootstrap.

pub mod logging;
