//! Process configuration, read once from the environment at startup.

use std::path::PathBuf;

use qalam_rag::retriever::CollectionSource;

/// What to do when language detection fails or yields a language
/// outside {en, ar}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePolicy {
    /// Fall back to English (logged). The original behavior.
    #[default]
    Default,
    /// Reject the request with a client error.
    Reject,
}

impl LanguagePolicy {
    fn from_env(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Application configuration.
///
/// Every field has a default matching the reference deployment;
/// `QALAM_*` environment variables override them. The Hugging Face
/// access token comes from `HF_TOKEN` and is optional.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Sentence-embedding model identifier.
    pub embedding_model: String,
    /// Embedding dimensionality of `embedding_model`.
    pub embedding_dimensions: usize,
    /// Causal-LM identifier used for answer generation.
    pub generation_model: String,
    /// English document and index paths.
    pub english: CollectionSource,
    /// Arabic document and index paths.
    pub arabic: CollectionSource,
    /// Number of passages to retrieve per query.
    pub top_k: usize,
    /// Unsupported-language handling.
    pub language_policy: LanguagePolicy,
    /// Optional Hugging Face access token.
    pub hf_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            embedding_model: "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2"
                .to_string(),
            embedding_dimensions: 384,
            generation_model: "bigscience/bloom-560m".to_string(),
            english: CollectionSource {
                documents_path: PathBuf::from("data/english_docs.json"),
                index_path: PathBuf::from("indices/english.index"),
            },
            arabic: CollectionSource {
                documents_path: PathBuf::from("data/arabic_docs.json"),
                index_path: PathBuf::from("indices/arabic.index"),
            },
            top_k: 3,
            language_policy: LanguagePolicy::Default,
            hf_token: None,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Build the configuration from the process environment, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(host) = env_var("QALAM_HOST") {
            config.host = host;
        }
        if let Some(port) = env_var("QALAM_PORT").and_then(|v| v.parse().ok()) {
            config.port = port;
        }
        if let Some(model) = env_var("QALAM_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }
        if let Some(dims) = env_var("QALAM_EMBEDDING_DIMENSIONS").and_then(|v| v.parse().ok()) {
            config.embedding_dimensions = dims;
        }
        if let Some(model) = env_var("QALAM_GENERATION_MODEL") {
            config.generation_model = model;
        }
        if let Some(path) = env_var("QALAM_ENGLISH_DOCS") {
            config.english.documents_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("QALAM_ENGLISH_INDEX") {
            config.english.index_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("QALAM_ARABIC_DOCS") {
            config.arabic.documents_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("QALAM_ARABIC_INDEX") {
            config.arabic.index_path = PathBuf::from(path);
        }
        if let Some(top_k) = env_var("QALAM_TOP_K").and_then(|v| v.parse().ok()) {
            config.top_k = top_k;
        }
        if let Some(policy) = env_var("QALAM_LANGUAGE_POLICY") {
            match LanguagePolicy::from_env(&policy) {
                Some(policy) => config.language_policy = policy,
                None => tracing::warn!(
                    value = %policy,
                    "unknown QALAM_LANGUAGE_POLICY, keeping default"
                ),
            }
        }
        config.hf_token = env_var("HF_TOKEN");

        config
    }
}
