//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite persistence for assessment records
//! - `sanitize`: PII filtering for logs

pub mod sanitize;
pub mod sqlite;

pub use sqlite::{SqliteAssessmentStore, StorageError};
