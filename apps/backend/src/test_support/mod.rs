//! Test helpers shared by unit and integration tests: fake text generators,
//! a state builder wired to them, and an Actix test service builder.

pub mod app_builder;
pub mod fake_generator;
pub mod state_builder;

pub use app_builder::create_test_app;
pub use fake_generator::{FailingGenerator, GatedGenerator, ScriptedGenerator, SlowGenerator};
pub use state_builder::create_test_state;
