//! Hugging Face Inference API text-generation backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ModelError, Result};
use crate::generate::{GenerationParams, TextGenerator};

/// Base URL for the Hugging Face Inference API text-generation pipeline.
const HF_TEXT_GENERATION_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Default generation model. bloom-560m has strong support for Arabic
/// and many other languages.
const DEFAULT_MODEL: &str = "bigscience/bloom-560m";

/// A [`TextGenerator`] backed by the Hugging Face Inference API.
///
/// Requests the full generated text (prompt included) so that answer
/// extraction can split on the prompt's answer cue.
pub struct HfTextGenerator {
    client: reqwest::Client,
    token: Option<String>,
    model: String,
}

impl HfTextGenerator {
    /// Create a backend for the default model.
    pub fn new(token: Option<String>) -> Self {
        Self { client: reqwest::Client::new(), token, model: DEFAULT_MODEL.into() }
    }

    /// Set the model identifier (a causal LM on the Hub).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{HF_TEXT_GENERATION_URL}/{}", self.model)
    }
}

// ── Inference API request/response types ───────────────────────────

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    num_return_sequences: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[async_trait]
impl TextGenerator for HfTextGenerator {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        debug!(
            provider = "HuggingFace",
            model = %self.model,
            prompt_len = prompt.len(),
            max_new_tokens = params.max_new_tokens,
            "requesting completion"
        );

        let body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: params.max_new_tokens,
                num_return_sequences: params.num_return_sequences,
                return_full_text: true,
            },
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "request failed");
            ModelError::Generation {
                provider: "HuggingFace".into(),
                message: format!("request failed: {e}"),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(provider = "HuggingFace", %status, "API error");
            return Err(ModelError::Generation {
                provider: "HuggingFace".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let completions: Vec<GeneratedText> = response.json().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "failed to parse response");
            ModelError::Generation {
                provider: "HuggingFace".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        completions.into_iter().next().map(|c| c.generated_text).ok_or_else(|| {
            ModelError::Generation {
                provider: "HuggingFace".into(),
                message: "API returned no completions".into(),
            }
        })
    }
}
