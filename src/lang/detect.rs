use whatlang::{Detector, Lang};

use super::{DetectedLang, LanguageDetector};

/// Trigram-based language identification restricted to the caller's candidates.
///
/// Script decides first (Devanagari text can only be Hindi among the candidates);
/// Latin-script text is ranked by trigram profile. Unreliable guesses are still
/// returned, matching the router's "best guess, else English" policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrigramDetector;

impl LanguageDetector for TrigramDetector {
    fn detect(&self, text: &str, candidates: &[DetectedLang]) -> Option<DetectedLang> {
        let allowlist: Vec<Lang> = candidates.iter().copied().map(to_whatlang).collect();
        if allowlist.is_empty() {
            return None;
        }
        Detector::with_allowlist(allowlist)
            .detect(text)
            .and_then(|info| from_whatlang(info.lang()))
    }
}

fn to_whatlang(lang: DetectedLang) -> Lang {
    match lang {
        DetectedLang::Eng => Lang::Eng,
        DetectedLang::Hin => Lang::Hin,
        DetectedLang::Fra => Lang::Fra,
        DetectedLang::Deu => Lang::Deu,
        DetectedLang::Spa => Lang::Spa,
    }
}

fn from_whatlang(lang: Lang) -> Option<DetectedLang> {
    match lang {
        Lang::Eng => Some(DetectedLang::Eng),
        Lang::Hin => Some(DetectedLang::Hin),
        Lang::Fra => Some(DetectedLang::Fra),
        Lang::Deu => Some(DetectedLang::Deu),
        Lang::Spa => Some(DetectedLang::Spa),
        _ => None,
    }
}
