//! Unified error types for Humactor

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Humactor
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed timing/motion configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input executor rejected or failed a primitive call
    #[error("Input injection error: {0}")]
    InputInjection(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new input injection error
    pub fn input_injection<S: Into<String>>(msg: S) -> Self {
        Error::InputInjection(msg.into())
    }
}
