use async_trait::async_trait;
use quiz_core::model::QuestionRecord;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::decode_records;
use crate::repository::{QuestionBankRepository, StorageError};

/// Bank served as a static JSON asset over HTTP.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    url: Url,
}

impl HttpRepository {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QuestionBankRepository for HttpRepository {
    async fn fetch_records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        debug!(url = %self.url, "fetching question bank");
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(self.url.to_string()));
        }
        if !status.is_success() {
            return Err(StorageError::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        decode_records(&bytes)
    }
}
