use serde::Serialize;
use tracing::{debug, info, warn};

use super::gateway::TranslationGateway;
use super::matcher::{FaqMatcher, MatchError};
use crate::corpus::{CorpusError, CorpusStore};
use crate::hf::similarity::SimilarityClient;
use crate::hf::translation::TranslationClient;
use crate::lang::{LanguageCode, LanguageDetector, LanguageRouter};
use crate::query::Query;

pub const FALLBACK_ANSWER: &str = "Sorry, I do not know the answer to that.";

/// Final answer for a query.
///
/// `question` and `confidence` are either both set (a confident match) or both
/// null (the fallback answer). The constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAnswer {
    question: Option<String>,
    answer: String,
    confidence: Option<f64>,
    language: LanguageCode,
}

impl ResolvedAnswer {
    pub fn matched(question: String, answer: String, confidence: f64, language: LanguageCode) -> Self {
        Self {
            question: Some(question),
            answer,
            confidence: Some(confidence),
            language,
        }
    }

    pub fn fallback(answer: String, language: LanguageCode) -> Self {
        Self {
            question: None,
            answer,
            confidence: None,
            language,
        }
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("could not load FAQ corpus: {0}")]
    Corpus(#[from] CorpusError),

    #[error("{0}")]
    Match(#[from] MatchError),

    #[error("query timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

/// Runs the resolution pipeline: route language, fetch corpus, match, gate, translate.
///
/// Each call is independent; the resolver holds only its ports.
pub struct QueryResolver<D, C, S, T> {
    router: LanguageRouter<D>,
    corpus: C,
    matcher: FaqMatcher<S>,
    gateway: TranslationGateway<T>,
}

impl<D, C, S, T> QueryResolver<D, C, S, T>
where
    D: LanguageDetector,
    C: CorpusStore,
    S: SimilarityClient,
    T: TranslationClient,
{
    pub fn new(detector: D, corpus: C, similarity: S, translator: T) -> Self {
        Self {
            router: LanguageRouter::new(detector),
            corpus,
            matcher: FaqMatcher::new(similarity),
            gateway: TranslationGateway::new(translator),
        }
    }

    pub async fn resolve(&self, query: &Query) -> Result<ResolvedAnswer, ResolveError> {
        let language = self.router.route(query);

        let corpus = self.corpus.fetch_all().await?;
        debug!(entries = corpus.len(), %language, "corpus fetched");

        match self.matcher.find_best(query, corpus).await? {
            Some(best) if best.is_confident() => {
                let answer = self.gateway.translate(&best.entry.answer, language).await;
                info!(score = best.score, index = best.index, %language, "answered from corpus");
                Ok(ResolvedAnswer::matched(
                    best.entry.question,
                    answer,
                    best.score,
                    language,
                ))
            }
            best => {
                match best {
                    Some(low) => info!(score = low.score, %language, "no confident match"),
                    None => warn!("FAQ corpus is empty, answering with fallback"),
                }
                let answer = self.gateway.translate(FALLBACK_ANSWER, language).await;
                Ok(ResolvedAnswer::fallback(answer, language))
            }
        }
    }
}
