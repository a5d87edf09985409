//! The answer generator: prompt → completion → extracted answer.

use std::sync::Arc;

use tracing::{debug, error, info};

use qalam_rag::Language;

use crate::generate::{GenerationParams, TextGenerator};
use crate::prompt::{build_prompt, extract_answer};

/// Returned when no generation backend could be constructed at startup.
const UNAVAILABLE_MESSAGE: &str = "Error: Language model is not available.";

/// Returned when the backend errors during a request.
const GENERATION_FAILED_MESSAGE: &str =
    "I am sorry, but I encountered an error while generating a response.";

/// Produces answers from a question and retrieved context.
///
/// Generation failures never escalate: a generator with no backend (one
/// that failed to initialize) or a backend that errors mid-request
/// yields a fixed error message instead. Callers treat the returned
/// string as the response either way.
pub struct Generator {
    backend: Option<Arc<dyn TextGenerator>>,
    params: GenerationParams,
}

impl Generator {
    /// Create a generator over a working backend.
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend: Some(backend), params: GenerationParams::default() }
    }

    /// Create a generator whose backend failed to initialize.
    ///
    /// Every call to [`generate`](Generator::generate) returns the fixed
    /// unavailable message.
    pub fn unavailable() -> Self {
        Self { backend: None, params: GenerationParams::default() }
    }

    /// Override the decoding bounds.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Generate an answer for `question` grounded in `context`.
    pub async fn generate(
        &self,
        question: &str,
        context: &[String],
        language: Language,
    ) -> String {
        let Some(backend) = &self.backend else {
            error!("generation requested but no backend is available");
            return UNAVAILABLE_MESSAGE.to_string();
        };

        let prompt = build_prompt(question, context, language);
        debug!(language = %language, prompt_len = prompt.len(), "built prompt");

        match backend.complete(&prompt, &self.params).await {
            Ok(generated) => {
                let answer = extract_answer(&generated, language);
                info!(language = %language, answer_len = answer.len(), "generated answer");
                answer
            }
            Err(e) => {
                error!(language = %language, error = %e, "generation failed");
                GENERATION_FAILED_MESSAGE.to_string()
            }
        }
    }
}
