//! Drives the resolver for the CLI: per-request timeouts and stdin batches.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::corpus::CorpusStore;
use crate::faq::{QueryResolver, ResolveError, ResolvedAnswer};
use crate::hf::similarity::SimilarityClient;
use crate::hf::translation::TranslationClient;
use crate::lang::LanguageDetector;
use crate::query::Query;

/// Queries resolved at once in batch mode.
const BATCH_CONCURRENCY: usize = 4;

/// One output line in batch mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchLine {
    Answer(ResolvedAnswer),
    Failed { error: String },
}

pub async fn resolve_with_timeout<D, C, S, T>(
    resolver: &QueryResolver<D, C, S, T>,
    query: &Query,
    timeout: Duration,
) -> Result<ResolvedAnswer, ResolveError>
where
    D: LanguageDetector,
    C: CorpusStore,
    S: SimilarityClient,
    T: TranslationClient,
{
    info!(query = %query.as_str(), "resolving query");
    let answer = tokio::time::timeout(timeout, resolver.resolve(query))
        .await
        .unwrap_or_else(|_| Err(ResolveError::TimedOut(timeout)))?;
    debug!(
        language = %answer.language(),
        matched = answer.question().is_some(),
        confidence = ?answer.confidence(),
        answer_len = answer.answer().len(),
        "query resolved"
    );
    Ok(answer)
}

/// Resolves each non-blank line, keeping output in input order.
pub async fn resolve_batch<D, C, S, T>(
    resolver: &QueryResolver<D, C, S, T>,
    lines: Vec<String>,
    timeout: Duration,
) -> Vec<BatchLine>
where
    D: LanguageDetector,
    C: CorpusStore,
    S: SimilarityClient,
    T: TranslationClient,
{
    let queries: Vec<Query> = lines
        .into_iter()
        .filter_map(|line| Query::new(line.trim_end_matches('\r')).ok())
        .collect();

    stream::iter(queries)
        .map(|query| async move {
            match resolve_with_timeout(resolver, &query, timeout).await {
                Ok(answer) => BatchLine::Answer(answer),
                Err(e) => {
                    warn!(error = %e, query = %query.as_str(), "query failed");
                    BatchLine::Failed {
                        error: e.to_string(),
                    }
                }
            }
        })
        .buffered(BATCH_CONCURRENCY)
        .collect()
        .await
}
