//! HTTP surface of the Qalam bilingual RAG chatbot.
//!
//! Exposes a single `POST /chat` endpoint: detect the question's
//! language, retrieve context from the language's index, generate an
//! answer grounded in that context. Configuration is read once from the
//! environment at startup; all shared state is immutable afterwards.

pub mod config;
pub mod detect;
pub mod handler;
pub mod server;

pub use config::{AppConfig, LanguagePolicy};
pub use handler::{ChatError, ChatService};
pub use server::{AppState, app_router, run_server};
