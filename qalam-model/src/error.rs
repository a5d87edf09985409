//! Error types for the `qalam-model` crate.

use thiserror::Error;

/// Errors that can occur during text generation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An error occurred while calling the generation backend.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generation backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for generation operations.
pub type Result<T> = std::result::Result<T, ModelError>;
