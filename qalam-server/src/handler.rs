//! The request handler: question in, answer string out.

use std::sync::Arc;

use qalam_model::Generator;
use qalam_rag::{Language, Retriever};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::LanguagePolicy;
use crate::detect::{Detection, detect_language};

/// Returned instead of invoking the generator when retrieval finds
/// nothing, in the query's language.
fn no_context_fallback(language: Language) -> &'static str {
    match language {
        Language::En => "I could not find relevant information to answer your question.",
        Language::Ar => "لم أتمكن من العثور على معلومات ذات صلة للإجابة على سؤالك.",
    }
}

/// Request-handling failures surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The question was empty or whitespace-only.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The detected language is unsupported and the policy rejects such
    /// queries. Carries the detected ISO 639-3 code (may be empty).
    #[error("unsupported language '{0}', only 'en' and 'ar' are supported")]
    UnsupportedLanguage(String),

    /// An unexpected internal fault. The message is logged in full and
    /// never sent to the client verbatim.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Answers questions: detect language → retrieve → generate.
///
/// Explicitly constructed with its collaborators and immutable after
/// construction, so one instance is shared across all request tasks.
pub struct ChatService {
    retriever: Arc<Retriever>,
    generator: Arc<Generator>,
    top_k: usize,
    policy: LanguagePolicy,
}

impl ChatService {
    /// Create a service over an initialized retriever and generator.
    pub fn new(
        retriever: Arc<Retriever>,
        generator: Arc<Generator>,
        top_k: usize,
        policy: LanguagePolicy,
    ) -> Self {
        Self { retriever, generator, top_k, policy }
    }

    /// Answer a question, or explain why it cannot be answered.
    ///
    /// Degraded states still produce `Ok`: an empty retrieval result
    /// yields the language's fixed fallback message without touching
    /// the generator, and generation failures come back as the
    /// generator's own error strings.
    ///
    /// # Errors
    ///
    /// [`ChatError::EmptyQuestion`] for blank input,
    /// [`ChatError::UnsupportedLanguage`] under the reject policy, and
    /// [`ChatError::Internal`] for retrieval faults.
    pub async fn answer(&self, question: &str) -> Result<String, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        info!(question, "handling chat request");

        let language = match detect_language(question, self.policy) {
            Detection::Language(language) => language,
            Detection::Rejected(code) => return Err(ChatError::UnsupportedLanguage(code)),
        };

        let context = self
            .retriever
            .retrieve(question, language, self.top_k)
            .await
            .map_err(|e| {
                error!(error = %e, "retrieval failed");
                ChatError::Internal(e.to_string())
            })?;

        if context.is_empty() {
            warn!(language = %language, "no relevant context found");
            return Ok(no_context_fallback(language).to_string());
        }

        Ok(self.generator.generate(question, &context, language).await)
    }
}
