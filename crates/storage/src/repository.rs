use async_trait::async_trait;
use quiz_core::model::{QuestionRecord, QuestionRecordError, validate_bank};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::sources::{HttpRepository, JsonFileRepository};

/// Errors surfaced while fetching the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question bank not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("question bank request failed with status {0}")]
    HttpStatus(u16),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid question bank location: {0}")]
    InvalidLocation(String),
}

/// Source of raw bank records. Fetched once per quiz start.
#[async_trait]
pub trait QuestionBankRepository: Send + Sync {
    /// Fetch every record as stored, without validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source is unreachable or not a JSON array of records.
    async fn fetch_records(&self) -> Result<Vec<QuestionRecord>, StorageError>;
}

/// Bank contents after load-time validation.
#[derive(Debug, Clone, Default)]
pub struct ValidatedBank {
    pub records: Vec<QuestionRecord>,
    pub rejected: Vec<QuestionRecordError>,
}

/// Fetch from `repo` and drop records that fail validation.
///
/// # Errors
///
/// Propagates the repository's `StorageError`. Malformed records are not an error;
/// they are logged and reported in `ValidatedBank::rejected`.
pub async fn load_validated(
    repo: &dyn QuestionBankRepository,
) -> Result<ValidatedBank, StorageError> {
    let raw = repo.fetch_records().await?;
    let fetched = raw.len();
    let (records, rejected) = validate_bank(raw);
    for err in &rejected {
        warn!(%err, "rejecting malformed question record");
    }
    info!(fetched, usable = records.len(), "question bank loaded");
    Ok(ValidatedBank { records, rejected })
}

/// In-memory bank for tests and embedding.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<Vec<QuestionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Swap the bank contents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn replace(&self, records: Vec<QuestionRecord>) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = records;
        Ok(())
    }
}

#[async_trait]
impl QuestionBankRepository for InMemoryRepository {
    async fn fetch_records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Where the bank asset lives: a local JSON file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankLocation {
    File(PathBuf),
    Http(Url),
}

impl BankLocation {
    /// Default asset path, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "assets/questions.json";

    /// Interpret `raw` as a URL when it has an `http`, `https` or `file` scheme,
    /// otherwise as a filesystem path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidLocation` for blank input, unsupported schemes,
    /// or `file:` URLs that do not map to a path.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StorageError::InvalidLocation(raw.to_string()));
        }

        match Url::parse(trimmed) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::File)
                    .map_err(|()| StorageError::InvalidLocation(raw.to_string())),
                // Single letters are Windows drive prefixes, not schemes.
                scheme if scheme.len() == 1 => Ok(Self::File(PathBuf::from(trimmed))),
                _ => Err(StorageError::InvalidLocation(raw.to_string())),
            },
            Err(_) => Ok(Self::File(PathBuf::from(trimmed))),
        }
    }
}

impl Default for BankLocation {
    fn default() -> Self {
        Self::File(PathBuf::from(Self::DEFAULT_PATH))
    }
}

impl fmt::Display for BankLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankLocation::File(path) => write!(f, "{}", path.display()),
            BankLocation::Http(url) => write!(f, "{url}"),
        }
    }
}

/// Bank repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub bank: Arc<dyn QuestionBankRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(records: Vec<QuestionRecord>) -> Self {
        Self {
            bank: Arc::new(InMemoryRepository::new(records)),
        }
    }

    #[must_use]
    pub fn from_location(location: &BankLocation) -> Self {
        let bank: Arc<dyn QuestionBankRepository> = match location {
            BankLocation::File(path) => Arc::new(JsonFileRepository::new(path.clone())),
            BankLocation::Http(url) => Arc::new(HttpRepository::new(url.clone())),
        };
        Self { bank }
    }
}
