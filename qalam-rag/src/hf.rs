//! Hugging Face Inference API embedding provider.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Base URL for the Hugging Face Inference API feature-extraction pipeline.
const HF_FEATURE_EXTRACTION_URL: &str =
    "https://router.huggingface.co/hf-inference/models";

/// The default multilingual sentence-embedding model.
const DEFAULT_MODEL: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Dimensionality of the default model's embeddings.
const DEFAULT_DIMENSIONS: usize = 384;

/// An [`EmbeddingProvider`] backed by the Hugging Face Inference API.
///
/// Calls the hosted feature-extraction pipeline for a sentence-transformers
/// model over `reqwest`. An access token is optional; without one the
/// request runs unauthenticated against public models.
///
/// # Example
///
/// ```rust,ignore
/// use qalam_rag::HfEmbeddingProvider;
///
/// let provider = HfEmbeddingProvider::new(std::env::var("HF_TOKEN").ok());
/// let embedding = provider.embed("hello world").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
pub struct HfEmbeddingProvider {
    client: reqwest::Client,
    token: Option<String>,
    model: String,
    dimensions: usize,
}

impl HfEmbeddingProvider {
    /// Create a provider for the default multilingual model.
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Set the model identifier (a sentence-transformers model on the Hub).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the embedding dimensionality reported by this provider.
    ///
    /// Must match the configured model's output size.
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }

    fn endpoint(&self) -> String {
        format!("{HF_FEATURE_EXTRACTION_URL}/{}/pipeline/feature-extraction", self.model)
    }
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: Vec<&'a str>,
}

#[async_trait]
impl EmbeddingProvider for HfEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RagError::Embedding {
            provider: "HuggingFace".into(),
            message: "API returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = "HuggingFace",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&FeatureExtractionRequest { inputs: texts.to_vec() });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "request failed");
            RagError::Embedding {
                provider: "HuggingFace".into(),
                message: format!("request failed: {e}"),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(provider = "HuggingFace", %status, "API error");
            return Err(RagError::Embedding {
                provider: "HuggingFace".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let embeddings: Vec<Vec<f32>> = response.json().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "failed to parse response");
            RagError::Embedding {
                provider: "HuggingFace".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        if embeddings.len() != texts.len() {
            return Err(RagError::Embedding {
                provider: "HuggingFace".into(),
                message: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    embeddings.len()
                ),
            });
        }

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
