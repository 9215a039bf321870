use tracing::debug;

use crate::corpus::FaqEntry;
use crate::hf::HfError;
use crate::hf::similarity::SimilarityClient;
use crate::query::Query;

/// Scores at or above this are trusted; anything lower gets the fallback answer.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.6;

/// Best corpus entry for a query. The score is only comparable within its batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub entry: FaqEntry,
    pub index: usize,
    pub score: f64,
}

impl MatchResult {
    pub fn is_confident(&self) -> bool {
        self.score >= ACCEPTANCE_THRESHOLD
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("similarity request failed: {0}")]
    Similarity(#[from] HfError),

    #[error("similarity service returned {got} scores for {expected} candidates")]
    ScoreCount { expected: usize, got: usize },

    #[error("similarity score at index {index} is not a finite number")]
    InvalidScore { index: usize },
}

#[derive(Debug, Clone)]
pub struct FaqMatcher<S> {
    similarity: S,
}

impl<S: SimilarityClient> FaqMatcher<S> {
    pub fn new(similarity: S) -> Self {
        Self { similarity }
    }

    #[cfg(test)]
    pub(crate) fn similarity(&self) -> &S {
        &self.similarity
    }

    /// Scores `query` against every corpus question in one batch and returns the best entry.
    ///
    /// An empty corpus yields `Ok(None)` without a remote call. A reply whose length
    /// differs from the corpus, or that holds a non-finite score, is an error: there is
    /// no safe way to pick an index from it.
    pub async fn find_best(
        &self,
        query: &Query,
        mut corpus: Vec<FaqEntry>,
    ) -> Result<Option<MatchResult>, MatchError> {
        if corpus.is_empty() {
            return Ok(None);
        }

        let questions: Vec<&str> = corpus.iter().map(|e| e.question.as_str()).collect();
        let scores = self
            .similarity
            .score_batch(query.as_str(), &questions)
            .await?;

        let (index, score) = pick_best(&scores, corpus.len())?;
        debug!(index, score, candidates = corpus.len(), "best match selected");
        Ok(Some(MatchResult {
            entry: corpus.swap_remove(index),
            index,
            score,
        }))
    }
}

/// Index and value of the highest score; the earliest index wins ties.
fn pick_best(scores: &[f64], expected: usize) -> Result<(usize, f64), MatchError> {
    if scores.len() != expected || scores.is_empty() {
        return Err(MatchError::ScoreCount {
            expected,
            got: scores.len(),
        });
    }

    let mut best = (0, f64::NEG_INFINITY);
    for (index, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            return Err(MatchError::InvalidScore { index });
        }
        if score > best.1 {
            best = (index, score);
        }
    }
    Ok(best)
}
