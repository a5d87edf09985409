//! Document records and per-language document collections.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{RagError, Result};

/// A source document: an identifier and its text.
///
/// IDs follow the source data convention `<prefix>_<number>`, e.g.
/// `eng_03` or `ar_12`. The numeric suffix doubles as the document's
/// vector ID in the language's index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier within the language's collection.
    pub id: String,
    /// The text content of the document.
    pub text: String,
}

/// Parse the numeric suffix of a document ID (`"eng_03"` → `3`).
///
/// Returns `None` if the ID has no `_` separator or the suffix is not a
/// non-negative integer.
pub fn vector_id(doc_id: &str) -> Option<u32> {
    let (_, suffix) = doc_id.rsplit_once('_')?;
    suffix.parse().ok()
}

/// A read-only mapping from document ID to text for one language.
///
/// Built once at startup from a JSON array of [`Document`]s; immutable
/// thereafter. A missing file yields an empty set rather than an error,
/// so a language with no data degrades to empty retrieval results.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    docs: HashMap<String, String>,
}

impl DocumentSet {
    /// Load a collection from a JSON array file of `{id, text}` records.
    ///
    /// A missing file is reported and treated as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Store`] if the file exists but cannot be read
    /// or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "document file not found, continuing with empty collection");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(RagError::Store {
                    path: path.display().to_string(),
                    message: format!("read failed: {e}"),
                });
            }
        };

        let documents: Vec<Document> =
            serde_json::from_str(&raw).map_err(|e| RagError::Store {
                path: path.display().to_string(),
                message: format!("invalid JSON: {e}"),
            })?;

        info!(path = %path.display(), count = documents.len(), "loaded documents");
        Ok(Self::from_documents(documents))
    }

    /// Build a set directly from documents (used by tests and loaders).
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let docs = documents.into_iter().map(|d| (d.id, d.text)).collect();
        Self { docs }
    }

    /// Look up a document's text by ID.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.docs.get(id).map(String::as_str)
    }

    /// Number of documents in the collection.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Iterate over `(id, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_id_parses_numeric_suffix() {
        assert_eq!(vector_id("eng_03"), Some(3));
        assert_eq!(vector_id("ar_00"), Some(0));
        assert_eq!(vector_id("eng_142"), Some(142));
    }

    #[test]
    fn vector_id_rejects_malformed_ids() {
        assert_eq!(vector_id("eng"), None);
        assert_eq!(vector_id("eng_"), None);
        assert_eq!(vector_id("eng_-1"), None);
        assert_eq!(vector_id("eng_three"), None);
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let set = DocumentSet::load(Path::new("does/not/exist.json")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn from_documents_maps_id_to_text() {
        let set = DocumentSet::from_documents(vec![
            Document { id: "eng_00".into(), text: "Paris is the capital of France.".into() },
            Document { id: "eng_01".into(), text: "Berlin is the capital of Germany.".into() },
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("eng_00"), Some("Paris is the capital of France."));
        assert_eq!(set.get("eng_99"), None);
    }
}
