use tracing::debug;

use super::{DetectedLang, LanguageCode, LanguageDetector};
use crate::query::Query;

/// Queries at or below this many UTF-16 units are answered in English without detection.
pub const SHORT_QUERY_MAX_LEN: usize = 15;

/// Picks the response language for a query. Never fails: anything the detector
/// cannot place in the supported set is answered in English.
#[derive(Debug, Clone)]
pub struct LanguageRouter<D> {
    detector: D,
}

impl<D: LanguageDetector> LanguageRouter<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn route(&self, query: &Query) -> LanguageCode {
        let len = query.utf16_len();
        if len <= SHORT_QUERY_MAX_LEN {
            debug!(len, "query too short for detection, using en");
            return LanguageCode::En;
        }

        let detected = self
            .detector
            .detect(query.as_str(), &DetectedLang::CANDIDATES);
        let language = detected.map(response_language).unwrap_or_default();
        debug!(
            detected = detected.map_or("und", DetectedLang::as_str),
            %language,
            "language routed"
        );
        language
    }
}

fn response_language(detected: DetectedLang) -> LanguageCode {
    match detected {
        DetectedLang::Hin => LanguageCode::Hi,
        DetectedLang::Deu => LanguageCode::De,
        DetectedLang::Fra => LanguageCode::Fr,
        DetectedLang::Spa => LanguageCode::Es,
        DetectedLang::Eng => LanguageCode::En,
    }
}
