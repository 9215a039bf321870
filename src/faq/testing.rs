//! Deterministic port implementations shared by the pipeline tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::corpus::{CorpusError, CorpusStore, FaqEntry};
use crate::hf::HfError;
use crate::hf::similarity::SimilarityClient;
use crate::hf::translation::TranslationClient;
use crate::lang::{DetectedLang, LanguageCode, LanguageDetector};

pub(crate) fn entries(pairs: &[(&str, &str)]) -> Vec<FaqEntry> {
    pairs
        .iter()
        .map(|(question, answer)| FaqEntry {
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect()
}

pub(crate) struct FixedDetector(pub Option<DetectedLang>);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str, _candidates: &[DetectedLang]) -> Option<DetectedLang> {
        self.0
    }
}

pub(crate) struct MockCorpus {
    entries: Option<Vec<FaqEntry>>,
    fetches: AtomicUsize,
}

impl MockCorpus {
    pub(crate) fn with(entries: Vec<FaqEntry>) -> Self {
        Self {
            entries: Some(entries),
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            entries: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CorpusStore for MockCorpus {
    async fn fetch_all(&self) -> Result<Vec<FaqEntry>, CorpusError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.entries.clone().ok_or_else(|| CorpusError::Status {
            code: 503,
            message: "store offline".into(),
        })
    }
}

pub(crate) struct MockSimilarity {
    scores: Option<Vec<f64>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockSimilarity {
    pub(crate) fn scoring(scores: Vec<f64>) -> Self {
        Self {
            scores: Some(scores),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            scores: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SimilarityClient for MockSimilarity {
    async fn score_batch(&self, source: &str, candidates: &[&str]) -> Result<Vec<f64>, HfError> {
        self.calls.lock().unwrap().push((
            source.to_string(),
            candidates.iter().map(|c| c.to_string()).collect(),
        ));
        self.scores.clone().ok_or(HfError::RateLimited)
    }
}

/// Translates by prefixing the target code, e.g. `[es] text`.
pub(crate) struct MockTranslator {
    supported: Vec<LanguageCode>,
    fail: bool,
    calls: Mutex<Vec<(String, LanguageCode)>>,
}

const ALL_TARGETS: [LanguageCode; 4] = [
    LanguageCode::Hi,
    LanguageCode::Fr,
    LanguageCode::De,
    LanguageCode::Es,
];

impl MockTranslator {
    pub(crate) fn working() -> Self {
        Self::supporting(&ALL_TARGETS)
    }

    pub(crate) fn supporting(targets: &[LanguageCode]) -> Self {
        Self {
            supported: targets.to_vec(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::working()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, LanguageCode)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TranslationClient for MockTranslator {
    fn supports(&self, target: LanguageCode) -> bool {
        self.supported.contains(&target)
    }

    async fn translate(&self, text: &str, target: LanguageCode) -> Result<String, HfError> {
        self.calls.lock().unwrap().push((text.to_string(), target));
        if self.fail {
            return Err(HfError::Api {
                code: 500,
                message: "translation backend down".into(),
            });
        }
        Ok(format!("[{target}] {text}"))
    }
}
