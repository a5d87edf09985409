//! Flat L2 vector index with file persistence.
//!
//! The index is exact: a search scans every stored vector and ranks by
//! squared Euclidean distance. Collections here are tens to hundreds of
//! documents, so approximation buys nothing.
//!
//! Each entry stores the full document ID next to its numeric vector ID.
//! Retrieval therefore never reconstructs IDs from a prefix and a
//! zero-padded number, and IDs of any width are safe.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::{DocumentSet, vector_id};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::language::Language;

/// Version tag written into persisted index files. Bump on any change
/// to [`PersistedIndex`]; loading a mismatched file fails and the
/// manager rebuilds from documents.
const FORMAT_VERSION: u32 = 1;

/// One indexed document: its numeric vector ID, full document ID, and
/// embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// Numeric ID parsed from the document ID's suffix.
    pub vector_id: u32,
    /// The full document identifier (e.g. `eng_07`).
    pub doc_id: String,
    /// The document text's embedding.
    pub embedding: Vec<f32>,
}

/// A search hit: a document reference and its distance from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The full document identifier.
    pub doc_id: String,
    /// The numeric vector ID.
    pub vector_id: u32,
    /// Squared L2 distance from the query embedding (lower is closer).
    pub distance: f32,
}

/// On-disk representation of a [`VectorIndex`].
#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

/// An exact nearest-neighbor index over document embeddings.
///
/// Built once at startup (or loaded from disk) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

/// Squared L2 distance between two equal-length vectors.
fn l2_distance_sq(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorIndex {
    /// Create an empty index for embeddings of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, entries: Vec::new() }
    }

    /// The embedding dimensionality this index accepts.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a document embedding under an explicit vector ID.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Index`] if the embedding's dimensionality does
    /// not match the index, or if the vector ID is already taken.
    pub fn insert(
        &mut self,
        vector_id: u32,
        doc_id: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(RagError::Index(format!(
                "embedding has {} dimensions, index expects {}",
                embedding.len(),
                self.dimensions
            )));
        }
        if self.entries.iter().any(|e| e.vector_id == vector_id) {
            return Err(RagError::Index(format!("vector ID {vector_id} already present")));
        }
        self.entries.push(IndexEntry { vector_id, doc_id: doc_id.into(), embedding });
        Ok(())
    }

    /// Find the `top_k` entries nearest to `query` by L2 distance.
    ///
    /// Hits are ordered by ascending distance, ties broken by vector ID
    /// so results are deterministic. Returns at most
    /// `min(top_k, len())` hits.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Index`] on a query dimensionality mismatch.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(RagError::Index(format!(
                "query has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                doc_id: entry.doc_id.clone(),
                vector_id: entry.vector_id,
                distance: l2_distance_sq(&entry.embedding, query),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.vector_id.cmp(&b.vector_id))
        });
        hits.truncate(top_k);
        Ok(hits)
    }

    /// Persist the index to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Index`] on IO or serialization failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RagError::Index(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let persisted = PersistedIndex {
            version: FORMAT_VERSION,
            dimensions: self.dimensions,
            entries: self.entries.clone(),
        };
        let raw = serde_json::to_vec(&persisted)
            .map_err(|e| RagError::Index(format!("serialization failed: {e}")))?;
        std::fs::write(path, raw)
            .map_err(|e| RagError::Index(format!("failed to write {}: {e}", path.display())))?;
        info!(path = %path.display(), vectors = self.entries.len(), "saved index");
        Ok(())
    }

    /// Load a persisted index from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Index`] if the file cannot be read, parsed, or
    /// was written by an incompatible version. Callers treat any load
    /// failure as "rebuild from documents".
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path)
            .map_err(|e| RagError::Index(format!("failed to read {}: {e}", path.display())))?;
        let persisted: PersistedIndex = serde_json::from_slice(&raw)
            .map_err(|e| RagError::Index(format!("corrupt index file {}: {e}", path.display())))?;
        if persisted.version != FORMAT_VERSION {
            return Err(RagError::Index(format!(
                "index file {} has format version {}, expected {FORMAT_VERSION}",
                path.display(),
                persisted.version
            )));
        }
        info!(path = %path.display(), vectors = persisted.entries.len(), "loaded index");
        Ok(Self { dimensions: persisted.dimensions, entries: persisted.entries })
    }

    /// The set of document IDs covered by this index.
    pub fn doc_ids(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.doc_id.as_str()).collect()
    }
}

/// Loads or builds per-language vector indices.
pub struct IndexManager;

impl IndexManager {
    /// Get the index for `language`: load it from `path` if a valid
    /// persisted copy exists, otherwise build it from `documents` and
    /// persist the result.
    ///
    /// Returns `Ok(None)` when `documents` is empty — no index is
    /// registered for the language and retrieval must degrade to empty
    /// results.
    ///
    /// # Errors
    ///
    /// Returns an error only when building fails (embedding failure or
    /// an unwritable index path). Load failures fall through to rebuild.
    pub async fn open_or_build(
        language: Language,
        path: &Path,
        documents: &DocumentSet,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Option<VectorIndex>> {
        if path.exists() {
            match VectorIndex::load(path) {
                Ok(index) => return Ok(Some(index)),
                Err(e) => {
                    warn!(language = %language, error = %e, "failed to load persisted index, rebuilding");
                }
            }
        }

        if documents.is_empty() {
            warn!(language = %language, "no documents to index");
            return Ok(None);
        }

        let index = Self::build(language, documents, provider).await?;
        index.save(path)?;
        Ok(Some(index))
    }

    /// Embed every document and assemble a flat index.
    async fn build(
        language: Language,
        documents: &DocumentSet,
        provider: &dyn EmbeddingProvider,
    ) -> Result<VectorIndex> {
        info!(language = %language, count = documents.len(), "building index");

        let mut ids = Vec::with_capacity(documents.len());
        let mut texts = Vec::with_capacity(documents.len());
        for (id, text) in documents.iter() {
            match vector_id(id) {
                Some(vid) => {
                    ids.push((vid, id));
                    texts.push(text);
                }
                None => {
                    warn!(language = %language, doc_id = id, "document ID has no numeric suffix, skipping");
                }
            }
        }

        let embeddings = provider.embed_batch(&texts).await?;

        let mut index = VectorIndex::new(provider.dimensions());
        for ((vid, doc_id), embedding) in ids.into_iter().zip(embeddings) {
            index.insert(vid, doc_id, embedding)?;
        }

        info!(language = %language, vectors = index.len(), "index built");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> VectorIndex {
        let mut index = VectorIndex::new(2);
        index.insert(0, "eng_00", vec![0.0, 0.0]).unwrap();
        index.insert(1, "eng_01", vec![1.0, 0.0]).unwrap();
        index.insert(2, "eng_02", vec![0.0, 2.0]).unwrap();
        index
    }

    #[test]
    fn search_orders_by_ascending_distance() {
        let index = sample_index();
        let hits = index.search(&[0.1, 0.0], 3).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.doc_id.as_str()).collect();
        assert_eq!(ids, ["eng_00", "eng_01", "eng_02"]);
        assert!(hits[0].distance <= hits[1].distance);
        assert!(hits[1].distance <= hits[2].distance);
    }

    #[test]
    fn search_truncates_to_top_k() {
        let index = sample_index();
        assert_eq!(index.search(&[0.0, 0.0], 2).unwrap().len(), 2);
        assert_eq!(index.search(&[0.0, 0.0], 10).unwrap().len(), 3);
    }

    #[test]
    fn insert_rejects_dimension_mismatch() {
        let mut index = VectorIndex::new(2);
        assert!(index.insert(0, "eng_00", vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn insert_rejects_duplicate_vector_id() {
        let mut index = sample_index();
        assert!(index.insert(1, "eng_99", vec![5.0, 5.0]).is_err());
    }

    #[test]
    fn search_rejects_query_dimension_mismatch() {
        let index = sample_index();
        assert!(index.search(&[1.0], 1).is_err());
    }

    #[test]
    fn three_digit_vector_ids_are_supported() {
        let mut index = VectorIndex::new(1);
        index.insert(142, "eng_142", vec![0.5]).unwrap();
        let hits = index.search(&[0.5], 1).unwrap();
        assert_eq!(hits[0].doc_id, "eng_142");
        assert_eq!(hits[0].vector_id, 142);
    }
}
