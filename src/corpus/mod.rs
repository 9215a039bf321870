//! FAQ corpus stores. The corpus is read fresh on every request and never written.

mod file;
mod supabase;

pub use file::FileCorpus;
pub use supabase::SupabaseCorpus;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One curated question and its canonical English answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("SUPABASE_URL and SUPABASE_KEY must be set (or pass --corpus <FILE>)")]
    NotConfigured,

    #[error("invalid corpus URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("corpus store error ({code}): {message}")]
    Status { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed corpus: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only access to the current FAQ corpus.
pub trait CorpusStore {
    async fn fetch_all(&self) -> Result<Vec<FaqEntry>, CorpusError>;
}

/// Corpus backend chosen at startup.
#[derive(Debug, Clone)]
pub enum Corpus {
    Supabase(SupabaseCorpus),
    File(FileCorpus),
}

impl CorpusStore for Corpus {
    async fn fetch_all(&self) -> Result<Vec<FaqEntry>, CorpusError> {
        match self {
            Corpus::Supabase(store) => store.fetch_all().await,
            Corpus::File(store) => store.fetch_all().await,
        }
    }
}
