//! Integration test utilities for the Nexus bot
//!
//! This crate wires the real services and SQLite store to a recording chat
//! platform so command scenarios run end to end without a network session.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
pub use platform::{RecordingPlatform, SentMessage};
