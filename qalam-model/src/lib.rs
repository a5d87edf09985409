//! Generation side of the Qalam bilingual RAG chatbot.
//!
//! Turns a question plus retrieved context passages into an answer:
//! builds a language-specific prompt, runs it through a hosted causal
//! language model, and extracts the text after the answer cue. The
//! [`Generator`] never fails a request — a missing or erroring model
//! degrades to a fixed error message.

pub mod error;
pub mod generate;
pub mod generator;
pub mod hf;
pub mod prompt;

pub use error::{ModelError, Result};
pub use generate::{GenerationParams, TextGenerator};
pub use generator::Generator;
pub use hf::HfTextGenerator;
