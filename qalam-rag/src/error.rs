//! Error types for the `qalam-rag` crate.

use thiserror::Error;

/// Errors that can occur while loading documents, managing indices, or
/// retrieving context.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while building, loading, or persisting a vector index.
    #[error("Index error: {0}")]
    Index(String),

    /// An error occurred while reading a document collection.
    #[error("Document store error ({path}): {message}")]
    Store {
        /// The file path being read.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
