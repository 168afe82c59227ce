pub mod http;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    CreatedVocab, NewVocab, PracticeResult, VocabId, VocabPage, VocabQuery, VocabularyItem,
};

pub use http::HttpStore;

/// The vocabulary store service. It owns persistence and scheduling; the
/// client only reads items and reports practice outcomes.
#[async_trait]
pub trait VocabStore: Send + Sync {
    async fn query(&self, query: &VocabQuery) -> Result<VocabPage, StoreError>;

    async fn create(&self, vocab: &NewVocab) -> Result<CreatedVocab, StoreError>;

    async fn delete(&self, id: VocabId) -> Result<(), StoreError>;

    /// Items due for practice, in the order they should be quizzed.
    async fn practice_batch(&self) -> Result<Vec<VocabularyItem>, StoreError>;

    async fn submit_results(&self, results: &[PracticeResult]) -> Result<(), StoreError>;

    async fn practice_count(&self) -> Result<u64, StoreError>;
}
