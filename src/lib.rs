//! Humactor: human-behavior input synthesis engine
//!
//! This library drives an externally-running interactive application by
//! synthesizing pointer and keyboard input that statistically resembles human
//! operation. Which actions to perform, and where, is the caller's decision;
//! this crate makes their execution look human.

pub mod error;
pub mod config;

pub mod input;
pub mod behavior;

// Re-exports
pub use error::{Error, Result};

/// Humactor library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
