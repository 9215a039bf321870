use serde::{Deserialize, Serialize};

/// Body for the sentence-similarity task.
#[derive(Debug, Serialize)]
pub struct SimilarityRequest<'a> {
    pub inputs: SimilarityInputs<'a>,
}

#[derive(Debug, Serialize)]
pub struct SimilarityInputs<'a> {
    pub source_sentence: &'a str,
    pub sentences: &'a [&'a str],
}

/// Body for the translation task.
#[derive(Debug, Serialize)]
pub struct TranslationRequest<'a> {
    pub inputs: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TranslationOutput {
    pub translation_text: Option<String>,
}

/// Error body returned by the Inference API, e.g. `{"error": "...", "estimated_time": 20.0}`.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: Option<serde_json::Value>,
    pub estimated_time: Option<f64>,
}

impl ApiError {
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            other => Some(other.to_string()),
        }
    }
}
