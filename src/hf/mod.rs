//! Hugging Face Inference API clients: sentence similarity and per-language translation.

pub mod similarity;
pub mod translation;
mod types;

use std::env;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::secret::{Secret, env_secret};
use types::ApiError;

const API_BASE: &str = "https://api-inference.huggingface.co";
/// Upper bound for a single inference call, including model cold starts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const ERROR_SNIPPET_LEN: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum HfError {
    #[error("HF_API_KEY not set. Create a token at https://huggingface.co/settings/tokens")]
    ApiKeyNotSet,

    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("model {model} is loading (estimated {estimated_secs:.0}s)")]
    ModelLoading { model: String, estimated_secs: f64 },

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("no translation model for language '{0}'")]
    NoModel(crate::lang::LanguageCode),

    #[error("response carried no translation text")]
    MissingTranslation,

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Authenticated transport shared by the similarity and translation clients.
#[derive(Clone, Debug)]
pub struct HfClient {
    http: Client,
    api_key: Secret,
    base_url: String,
}

impl HfClient {
    pub fn from_env(http: Client) -> Result<Self, HfError> {
        let api_key = env_secret("HF_API_KEY").ok_or(HfError::ApiKeyNotSet)?;
        let base_url = env::var("HF_API_BASE")
            .ok()
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| API_BASE.to_string());
        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: Secret::new("test-key"),
            base_url: base_url.to_string(),
        }
    }

    /// Runs one inference call against `model` and decodes the reply as `R`.
    async fn infer<B, R>(&self, model: &str, body: &B) -> Result<R, HfError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/models/{model}", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(model, "Hugging Face API rate limited");
            return Err(HfError::RateLimited);
        }

        let text = response.text().await?;
        if !status.is_success() {
            let classified = classify_failure(model, status, &text);
            warn!(model, error = %classified, "Hugging Face API error");
            return Err(classified);
        }

        match serde_json::from_str::<R>(&text) {
            Ok(decoded) => {
                debug!(model, "inference complete");
                Ok(decoded)
            }
            Err(decode_err) => {
                if let Ok(body) = serde_json::from_str::<ApiError>(&text)
                    && let Some(message) = body.message()
                {
                    warn!(model, %message, "Hugging Face API error in 200 response");
                    return Err(HfError::Api {
                        code: status.as_u16(),
                        message,
                    });
                }
                Err(decode_err.into())
            }
        }
    }
}

fn classify_failure(model: &str, status: StatusCode, text: &str) -> HfError {
    let code = status.as_u16();
    match serde_json::from_str::<ApiError>(text) {
        Ok(body) if code == 503 && body.estimated_time.is_some() => HfError::ModelLoading {
            model: model.to_string(),
            estimated_secs: body.estimated_time.unwrap_or_default(),
        },
        Ok(body) if body.error.is_some() => HfError::Api {
            code,
            message: body.message().unwrap_or_default(),
        },
        _ => {
            let end = text.floor_char_boundary(ERROR_SNIPPET_LEN);
            HfError::Api {
                code,
                message: format!("HTTP {status}: {}", &text[..end]),
            }
        }
    }
}
