use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CorpusError, CorpusStore, FaqEntry};

/// Corpus kept in a local JSON array of `{"question", "answer"}` objects.
/// The file is re-read on every fetch so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CorpusStore for FileCorpus {
    async fn fetch_all(&self) -> Result<Vec<FaqEntry>, CorpusError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CorpusError::Io {
                path: self.path.clone(),
                source,
            })?;
        let entries: Vec<FaqEntry> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), entries = entries.len(), "corpus loaded");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn corpus_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_entries_in_order_ignoring_extra_fields() {
        let file = corpus_file(
            r#"[
                {"id": 1, "question": "How do I reset my password?", "answer": "Use the reset link."},
                {"id": 2, "question": "What are your hours?", "answer": "9 to 5."}
            ]"#,
        );

        let entries = FileCorpus::new(file.path()).fetch_all().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "How do I reset my password?");
        assert_eq!(entries[1].answer, "9 to 5.");
    }

    #[tokio::test]
    async fn rereads_file_on_every_fetch() {
        let file = corpus_file("[]");
        let corpus = FileCorpus::new(file.path());
        assert!(corpus.fetch_all().await.unwrap().is_empty());

        std::fs::write(file.path(), r#"[{"question": "q", "answer": "a"}]"#).unwrap();
        assert_eq!(corpus.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileCorpus::new(dir.path().join("absent.json")).fetch_all().await;
        match result {
            Err(CorpusError::Io { path, .. }) => assert!(path.ends_with("absent.json")),
            other => panic!("expected Io error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn entry_without_answer_is_decode_error() {
        let file = corpus_file(r#"[{"question": "orphan"}]"#);
        let result = FileCorpus::new(file.path()).fetch_all().await;
        assert!(matches!(result, Err(CorpusError::Decode(_))));
    }
}
