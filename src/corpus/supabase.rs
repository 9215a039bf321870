use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{CorpusError, CorpusStore, FaqEntry};
use crate::secret::{Secret, env_secret};

const DEFAULT_TABLE: &str = "faqs";
const ERROR_SNIPPET_LEN: usize = 200;
/// Upper bound for one corpus read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Corpus stored in a Supabase table, read through its PostgREST endpoint.
///
/// Configuration via environment variables:
/// - `SUPABASE_URL`: project URL, e.g. `https://xyz.supabase.co`
/// - `SUPABASE_KEY`: anon or service key
/// - `FAQ_TABLE`: table name (default: `faqs`)
#[derive(Debug, Clone)]
pub struct SupabaseCorpus {
    http: Client,
    endpoint: Url,
    key: Secret,
    timeout: Duration,
}

impl SupabaseCorpus {
    pub fn from_env(http: Client) -> Result<Self, CorpusError> {
        let base = env_secret("SUPABASE_URL").ok_or(CorpusError::NotConfigured)?;
        let key = env_secret("SUPABASE_KEY").ok_or(CorpusError::NotConfigured)?;
        let table = env::var("FAQ_TABLE")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let endpoint = table_endpoint(base.expose(), &table)?;
        Ok(Self {
            http,
            endpoint,
            key,
            timeout: REQUEST_TIMEOUT,
        })
    }

    #[cfg(test)]
    fn with_base_url(http: Client, base_url: &str, table: &str) -> Self {
        Self {
            http,
            endpoint: table_endpoint(base_url, table).unwrap(),
            key: Secret::new("test-key"),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn table_endpoint(base: &str, table: &str) -> Result<Url, CorpusError> {
    let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;
    let mut endpoint = base.join("rest/v1/")?.join(table)?;
    endpoint
        .query_pairs_mut()
        .append_pair("select", "question,answer");
    Ok(endpoint)
}

impl CorpusStore for SupabaseCorpus {
    async fn fetch_all(&self) -> Result<Vec<FaqEntry>, CorpusError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header("apikey", self.key.expose())
            .bearer_auth(self.key.expose())
            .header("Accept", "application/json")
            .header("User-Agent", crate::USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let end = text.floor_char_boundary(ERROR_SNIPPET_LEN);
            warn!(status = %status, "corpus fetch failed");
            return Err(CorpusError::Status {
                code: status.as_u16(),
                message: text[..end].to_string(),
            });
        }

        let entries: Vec<FaqEntry> = serde_json::from_str(&response.text().await?)?;
        debug!(entries = entries.len(), "corpus fetched");
        Ok(entries)
    }
}
