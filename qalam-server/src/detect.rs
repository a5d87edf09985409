//! Query language detection.

use qalam_rag::Language;
use tracing::{info, warn};

use crate::config::LanguagePolicy;

/// The policy's verdict on a query whose language is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The query is in a supported language (or was defaulted to one).
    Language(Language),
    /// Policy is [`LanguagePolicy::Reject`] and the detected language
    /// (by ISO 639-3 code, empty when detection failed) is unsupported.
    Rejected(String),
}

/// Detect the language of `text` and apply the unsupported-language
/// policy.
///
/// English and Arabic map to their [`Language`] variants. Any other
/// detection result, and detection failure itself, either defaults to
/// English (logged) or rejects, depending on `policy`.
pub fn detect_language(text: &str, policy: LanguagePolicy) -> Detection {
    let detected = whatlang::detect(text).map(|info| info.lang());

    let supported = match detected {
        Some(whatlang::Lang::Eng) => Some(Language::En),
        Some(whatlang::Lang::Ara) => Some(Language::Ar),
        _ => None,
    };

    if let Some(language) = supported {
        info!(language = %language, "detected query language");
        return Detection::Language(language);
    }

    let code = detected.map(|lang| lang.code().to_string()).unwrap_or_default();
    match policy {
        LanguagePolicy::Default => {
            warn!(
                detected = %code,
                "query language unsupported or undetected, defaulting to English"
            );
            Detection::Language(Language::En)
        }
        LanguagePolicy::Reject => {
            warn!(detected = %code, "query language unsupported, rejecting");
            Detection::Rejected(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        let detection = detect_language(
            "What is the capital of France and where is it located?",
            LanguagePolicy::Default,
        );
        assert_eq!(detection, Detection::Language(Language::En));
    }

    #[test]
    fn detects_arabic() {
        let detection =
            detect_language("ما هي عاصمة فرنسا وأين تقع هذه المدينة؟", LanguagePolicy::Default);
        assert_eq!(detection, Detection::Language(Language::Ar));
    }

    #[test]
    fn unsupported_language_defaults_to_english() {
        // German, clearly not en/ar.
        let detection = detect_language(
            "Wie viele Einwohner hat die deutsche Hauptstadt Berlin ungefähr?",
            LanguagePolicy::Default,
        );
        assert_eq!(detection, Detection::Language(Language::En));
    }

    #[test]
    fn unsupported_language_rejects_under_reject_policy() {
        let detection = detect_language(
            "Wie viele Einwohner hat die deutsche Hauptstadt Berlin ungefähr?",
            LanguagePolicy::Reject,
        );
        assert!(matches!(detection, Detection::Rejected(_)));
    }
}
