//! Query-time retrieval over the per-language collections.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::document::DocumentSet;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::{IndexManager, VectorIndex};
use crate::language::Language;

/// Where one language's data lives on disk.
#[derive(Debug, Clone)]
pub struct CollectionSource {
    /// JSON array of `{id, text}` documents.
    pub documents_path: PathBuf,
    /// Persisted vector index (created on first build).
    pub index_path: PathBuf,
}

/// Maps queries to the texts of their nearest documents.
///
/// Holds one [`DocumentSet`] per language plus the language's
/// [`VectorIndex`] (absent when the language has no documents), and the
/// embedding provider shared with index construction. All state is
/// immutable after [`initialize`](Retriever::initialize), so the
/// retriever can be shared across request tasks behind an `Arc`.
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    documents: HashMap<Language, DocumentSet>,
    indices: HashMap<Language, VectorIndex>,
}

impl Retriever {
    /// Load both languages' documents and open or build their indices.
    ///
    /// The two languages share no mutable state, so their setup runs
    /// concurrently. A language with no documents ends up with no index
    /// and empty retrieval results; that is not an error. Neither is a
    /// failed setup (unreadable document file, embedding failure during
    /// an index build): the failure is logged and the language is left
    /// unregistered, so its queries degrade to empty results instead of
    /// taking the process down.
    pub async fn initialize(
        provider: Arc<dyn EmbeddingProvider>,
        english: CollectionSource,
        arabic: CollectionSource,
    ) -> Self {
        let (en, ar) = tokio::join!(
            Self::load_language(Language::En, &english, provider.as_ref()),
            Self::load_language(Language::Ar, &arabic, provider.as_ref()),
        );

        let mut documents = HashMap::new();
        let mut indices = HashMap::new();
        for (language, outcome) in [(Language::En, en), (Language::Ar, ar)] {
            match outcome {
                Ok((docs, index)) => {
                    info!(
                        language = %language,
                        documents = docs.len(),
                        indexed = index.is_some(),
                        "collection ready"
                    );
                    documents.insert(language, docs);
                    if let Some(index) = index {
                        indices.insert(language, index);
                    }
                }
                Err(e) => {
                    error!(language = %language, error = %e, "collection setup failed, language disabled");
                    documents.insert(language, DocumentSet::default());
                }
            }
        }

        Self { provider, documents, indices }
    }

    async fn load_language(
        language: Language,
        source: &CollectionSource,
        provider: &dyn EmbeddingProvider,
    ) -> Result<(DocumentSet, Option<VectorIndex>)> {
        let docs = DocumentSet::load(&source.documents_path)?;
        let index =
            IndexManager::open_or_build(language, &source.index_path, &docs, provider).await?;
        Ok((docs, index))
    }

    /// Assemble a retriever from already-built parts.
    ///
    /// Used by tests and by callers that manage index construction
    /// themselves.
    pub fn from_parts(
        provider: Arc<dyn EmbeddingProvider>,
        documents: HashMap<Language, DocumentSet>,
        indices: HashMap<Language, VectorIndex>,
    ) -> Self {
        Self { provider, documents, indices }
    }

    /// Retrieve the texts of the `top_k` documents nearest to `query`.
    ///
    /// Results are ordered by ascending distance. A language with no
    /// registered index yields an empty result, not an error. Hits whose
    /// document ID is absent from the document set are skipped: the index
    /// and the document file may have drifted apart.
    ///
    /// # Errors
    ///
    /// Returns an error only if query embedding or the index search
    /// itself fails.
    pub async fn retrieve(
        &self,
        query: &str,
        language: Language,
        top_k: usize,
    ) -> Result<Vec<String>> {
        let Some(index) = self.indices.get(&language) else {
            error!(language = %language, "no index registered for language");
            return Ok(Vec::new());
        };

        let query_embedding = self.provider.embed(query).await?;
        let hits = index.search(&query_embedding, top_k)?;

        let empty = DocumentSet::default();
        let docs = self.documents.get(&language).unwrap_or(&empty);
        let mut retrieved = Vec::with_capacity(hits.len());
        for hit in &hits {
            match docs.get(&hit.doc_id) {
                Some(text) => retrieved.push(text.to_string()),
                None => {
                    error!(language = %language, doc_id = %hit.doc_id, "indexed document missing from collection");
                }
            }
        }

        info!(language = %language, hits = hits.len(), retrieved = retrieved.len(), "retrieval complete");
        Ok(retrieved)
    }
}
