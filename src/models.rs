use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type VocabId = u64;

/// A stored term/translation pair. `knowledge_level` and `practice_at` are
/// written by the store only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: VocabId,
    pub term: String,
    pub translation: String,
    pub knowledge_level: u32,
    pub practice_at: DateTime<Utc>,
}

/// Outcome of one practice round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeResult {
    pub id: VocabId,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVocab {
    pub term: String,
    pub translation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedVocab {
    pub id: VocabId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VocabPage {
    pub items: Vec<VocabularyItem>,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PracticeCount {
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderKey {
    #[default]
    Term,
    KnowledgeAsc,
    KnowledgeDesc,
    PracticeAtAsc,
    PracticeAtDesc,
}

impl OrderKey {
    pub const ALL: [OrderKey; 5] = [
        OrderKey::Term,
        OrderKey::KnowledgeAsc,
        OrderKey::KnowledgeDesc,
        OrderKey::PracticeAtAsc,
        OrderKey::PracticeAtDesc,
    ];

    /// Value of the `order_by` query parameter. The store sorts by term when empty.
    pub fn as_param(self) -> &'static str {
        match self {
            OrderKey::Term => "",
            OrderKey::KnowledgeAsc => "knowledge_level",
            OrderKey::KnowledgeDesc => "knowledge_level_desc",
            OrderKey::PracticeAtAsc => "practice_at",
            OrderKey::PracticeAtDesc => "practice_at_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderKey::Term => "term",
            OrderKey::KnowledgeAsc => "knowledge",
            OrderKey::KnowledgeDesc => "knowledge [desc]",
            OrderKey::PracticeAtAsc => "practice next",
            OrderKey::PracticeAtDesc => "practice next [desc]",
        }
    }

    pub fn next(self) -> OrderKey {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// `term` and `translation` filters are combined with OR by the store.
pub const MATCH_MODE: &str = "or";

/// Parameters of `GET /api/vocab`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabQuery {
    pub skip: u32,
    pub take: u32,
    pub term: String,
    pub translation: String,
    pub order_by: OrderKey,
}

impl VocabQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("skip", self.skip.to_string()),
            ("take", self.take.to_string()),
            ("term", self.term.clone()),
            ("translation", self.translation.clone()),
            ("mode", MATCH_MODE.to_string()),
            ("order_by", self.order_by.as_param().to_string()),
        ]
    }
}

/// Identifies one issued query so that superseded responses can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    Query { ticket: Ticket, query: VocabQuery },
    Create(NewVocab),
    Delete { id: VocabId },
    FetchBatch,
    SubmitResults(Vec<PracticeResult>),
    PracticeCount,
}

#[derive(Debug)]
pub enum StoreResponse {
    Page {
        ticket: Ticket,
        result: Result<VocabPage, StoreError>,
    },
    Created {
        vocab: NewVocab,
        result: Result<CreatedVocab, StoreError>,
    },
    Deleted {
        id: VocabId,
        result: Result<(), StoreError>,
    },
    Batch(Result<Vec<VocabularyItem>, StoreError>),
    Submitted(Result<(), StoreError>),
    PracticeCount(Result<u64, StoreError>),
}

/// A request or response tagged with the mount generation of the view that issued it.
#[derive(Debug)]
pub struct Envelope<T> {
    pub generation: u64,
    pub payload: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    VocabList,
    AddVocab,
    Practice,
}

/// Side effect requested by a view; executed by the application shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Store(StoreRequest),
    Navigate(Screen),
}
