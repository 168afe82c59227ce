use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::VocabStore;
use crate::error::StoreError;
use crate::models::{
    CreatedVocab, NewVocab, PracticeCount, PracticeResult, VocabId, VocabPage, VocabQuery,
    VocabularyItem,
};

/// Talks to the store service's JSON API under `<base_url>/api`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status.as_u16()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let body = ensure_success(response)?.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl VocabStore for HttpStore {
    async fn query(&self, query: &VocabQuery) -> Result<VocabPage, StoreError> {
        let response = self
            .client
            .get(self.url("/vocab"))
            .query(&query.to_params())
            .send()
            .await?;
        read_json(response).await
    }

    async fn create(&self, vocab: &NewVocab) -> Result<CreatedVocab, StoreError> {
        let response = self
            .client
            .post(self.url("/vocab"))
            .json(vocab)
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete(&self, id: VocabId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.url(&format!("/vocab/{}", id)))
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn practice_batch(&self) -> Result<Vec<VocabularyItem>, StoreError> {
        let response = self.client.get(self.url("/practice")).send().await?;
        read_json(response).await
    }

    async fn submit_results(&self, results: &[PracticeResult]) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.url("/practice"))
            .json(results)
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn practice_count(&self) -> Result<u64, StoreError> {
        let response = self.client.get(self.url("/practice/count")).send().await?;
        let count: PracticeCount = read_json(response).await?;
        Ok(count.count)
    }
}
