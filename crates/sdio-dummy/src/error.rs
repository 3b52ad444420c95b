//! Error types for the emulated card

use thiserror::Error;

/// Errors from configuring a dummy card
#[derive(Debug, Error)]
pub enum DummyError {
    /// Parameter value could not be parsed or is out of range
    #[error("Invalid value '{value}' for parameter '{key}'")]
    InvalidParameter {
        /// Parameter name
        key: String,
        /// Offending value
        value: String,
    },

    /// Parameter name not recognized
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}
