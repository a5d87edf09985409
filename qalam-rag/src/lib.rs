//! Retrieval side of the Qalam bilingual RAG chatbot.
//!
//! This crate owns everything between a raw query string and a list of
//! context passages: per-language document collections loaded from JSON,
//! an exact (flat) L2 vector index with file persistence, an embedding
//! provider abstraction with a Hugging Face Inference API backend, and
//! the [`Retriever`] that ties them together.
//!
//! Both supported languages (English and Arabic) get their own document
//! collection and index, built once at startup and read-only afterwards.

pub mod document;
pub mod embedding;
pub mod error;
pub mod hf;
pub mod index;
pub mod language;
pub mod retriever;

pub use document::{Document, DocumentSet};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use hf::HfEmbeddingProvider;
pub use index::{IndexManager, SearchHit, VectorIndex};
pub use language::Language;
pub use retriever::Retriever;
