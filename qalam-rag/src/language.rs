//! The two languages Qalam serves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported query/document language.
///
/// Qalam supports exactly two fixed collections: English and Arabic.
/// Each language has a detection tag (`en` / `ar`) and a document ID
/// prefix (`eng` / `ar`) inherited from the source data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Arabic.
    Ar,
}

impl Language {
    /// Both supported languages, in startup-iteration order.
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// The detected-language tag (`"en"` or `"ar"`).
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// The prefix used in document IDs (`"eng"` or `"ar"`).
    pub fn doc_prefix(self) -> &'static str {
        match self {
            Language::En => "eng",
            Language::Ar => "ar",
        }
    }

    /// Parse a detection tag. Returns `None` for anything outside
    /// `{"en", "ar"}`.
    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
