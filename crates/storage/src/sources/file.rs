use async_trait::async_trait;
use quiz_core::model::QuestionRecord;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::decode_records;
use crate::repository::{QuestionBankRepository, StorageError};

/// Bank stored as a JSON array on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionBankRepository for JsonFileRepository {
    async fn fetch_records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        debug!(path = %self.path.display(), "reading question bank");
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(self.path.display().to_string()),
            _ => StorageError::Connection(e.to_string()),
        })?;
        decode_records(&bytes)
    }
}
