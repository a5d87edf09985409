//! Text-generation backend trait.

use async_trait::async_trait;

use crate::error::Result;

/// Decoding bounds passed to the generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Maximum number of newly generated tokens.
    pub max_new_tokens: u32,
    /// Number of completions to request. Qalam always uses one.
    pub num_return_sequences: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { max_new_tokens: 150, num_return_sequences: 1 }
    }
}

/// A causal-language-model completion backend.
///
/// `complete` returns the full generated text including the prompt, the
/// way hosted text-generation pipelines do, with decoding stopped at
/// the model's end-of-sequence token; answer extraction happens
/// downstream in [`prompt::extract_answer`](crate::prompt::extract_answer).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion for `prompt` under the given bounds.
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}
