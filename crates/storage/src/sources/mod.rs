mod file;
mod http;

pub use file::JsonFileRepository;
pub use http::HttpRepository;

use quiz_core::model::QuestionRecord;

use crate::repository::StorageError;

pub(crate) fn decode_records(bytes: &[u8]) -> Result<Vec<QuestionRecord>, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}
