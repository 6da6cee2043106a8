//! Test support for mockmill
//!
//! In-memory host implementations: a scripted source model for end-to-end
//! engine tests, and mockall mocks of the host traits for narrow ones.

pub mod mocks;
pub mod scripted;

pub use mocks::{mock_source_model, MockSourceModel};
pub use scripted::ScriptedSource;
