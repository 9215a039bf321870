//! Language identification and response-language routing.

mod detect;
mod router;

pub use detect::TrigramDetector;
pub use router::LanguageRouter;

use std::fmt;

use serde::Serialize;

/// Language an answer is delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Hi,
    Fr,
    De,
    Es,
}

impl LanguageCode {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Hi => "hi",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
            LanguageCode::Es => "es",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detection vocabulary (ISO 639-3), kept apart from the response-facing codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedLang {
    Eng,
    Hin,
    Fra,
    Deu,
    Spa,
}

impl DetectedLang {
    /// Candidates the router restricts detection to.
    pub const CANDIDATES: [DetectedLang; 5] = [
        DetectedLang::Hin,
        DetectedLang::Eng,
        DetectedLang::Deu,
        DetectedLang::Fra,
        DetectedLang::Spa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DetectedLang::Eng => "eng",
            DetectedLang::Hin => "hin",
            DetectedLang::Fra => "fra",
            DetectedLang::Deu => "deu",
            DetectedLang::Spa => "spa",
        }
    }
}

impl fmt::Display for DetectedLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language identification over free text.
/// Implemented by `TrigramDetector` for production; fixed-answer mocks used in tests.
pub trait LanguageDetector {
    /// Returns the most likely language among `candidates`, or `None` when undetermined.
    fn detect(&self, text: &str, candidates: &[DetectedLang]) -> Option<DetectedLang>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_code_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LanguageCode::Es).unwrap(), "\"es\"");
        assert_eq!(serde_json::to_string(&LanguageCode::En).unwrap(), "\"en\"");
    }

    #[test]
    fn default_language_is_english() {
        assert_eq!(LanguageCode::default(), LanguageCode::En);
    }

    #[test]
    fn detected_codes_are_three_letter() {
        for lang in DetectedLang::CANDIDATES {
            assert_eq!(lang.as_str().len(), 3, "{lang}");
        }
    }
}
