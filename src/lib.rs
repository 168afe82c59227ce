pub mod add_vocab;
pub mod app;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod csv;
pub mod debounce;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod notifications;
pub mod practice;
pub mod sequence;
pub mod store;
pub mod store_worker;
pub mod ui;
pub mod utils;
pub mod vocab_list;

// Re-exports for convenience
pub use app::App;
pub use cli::{Cli, Commands};
pub use config::Config;
pub use csv::{export_csv, import_csv};
pub use error::{AppError, CsvError, StoreError};
pub use models::{Command, Envelope, Screen, StoreRequest, StoreResponse, VocabularyItem};
pub use notifications::Notifications;
pub use practice::{PracticeSession, SubmitFailurePolicy};
pub use store::{HttpStore, VocabStore};
pub use store_worker::spawn_store_worker;
pub use vocab_list::VocabList;
