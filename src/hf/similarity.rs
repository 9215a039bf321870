use std::env;

use tracing::debug;

use super::types::{SimilarityInputs, SimilarityRequest};
use super::{HfClient, HfError};

pub const DEFAULT_MODEL: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Batched semantic similarity between one source text and an ordered list of candidates.
/// Implemented by `HfSimilarity` for production; mock implementations used in tests.
pub trait SimilarityClient {
    /// Returns the scores in candidate order. Length checks are left to the caller.
    async fn score_batch(&self, source: &str, candidates: &[&str]) -> Result<Vec<f64>, HfError>;
}

#[derive(Clone, Debug)]
pub struct HfSimilarity {
    client: HfClient,
    model: String,
}

impl HfSimilarity {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Uses `FAQ_SIMILARITY_MODEL` when set, otherwise the multilingual MiniLM model.
    pub fn from_env(client: HfClient) -> Self {
        let model = env::var("FAQ_SIMILARITY_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(client, model)
    }
}

impl SimilarityClient for HfSimilarity {
    async fn score_batch(&self, source: &str, candidates: &[&str]) -> Result<Vec<f64>, HfError> {
        let request = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: source,
                sentences: candidates,
            },
        };
        let scores: Vec<f64> = self.client.infer(&self.model, &request).await?;
        debug!(
            model = %self.model,
            candidates = candidates.len(),
            scores = scores.len(),
            "similarity scored"
        );
        Ok(scores)
    }
}
