//! SQLite adapter: Implementation of `AssessmentStore`.
//!
//! Stores one row per scored assessment. Structured columns (conditions,
//! recommendations, input snapshot) are kept as JSON text.
//!
//! # Mutex Behavior
//!
//! The connection sits behind a `Mutex`. A poisoned lock surfaces as
//! `StorageError::LockPoisoned` instead of panicking the caller.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::SecondsFormat;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

use crate::domain::{AssessmentKind, AssessmentRecord, RiskLevel};
use crate::ports::{AssessmentStore, RecordPage};

const SELECT_COLUMNS: &str = r"
    SELECT id, kind, level, score, detected_conditions, recommendations, input, created_at
    FROM assessments
";

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Page bounds out of range: offset {offset}, limit {limit}")]
    PageOutOfRange { offset: usize, limit: usize },
}

/// Column holding a token this build does not know.
#[derive(Debug, thiserror::Error)]
#[error("unknown {column} value: {value}")]
struct UnknownToken {
    column: &'static str,
    value: String,
}

/// SQLite storage adapter.
pub struct SqliteAssessmentStore {
    conn: Mutex<Connection>,
}

impl SqliteAssessmentStore {
    /// Open (or create) a database file.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory database.
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// SQLite takes signed bounds and reads a negative OFFSET as 0.
    fn sql_bounds(offset: usize, limit: usize) -> Result<(i64, i64), StorageError> {
        match (i64::try_from(offset), i64::try_from(limit)) {
            (Ok(o), Ok(l)) => Ok((o, l)),
            _ => Err(StorageError::PageOutOfRange { offset, limit }),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                level TEXT NOT NULL,
                score INTEGER,
                detected_conditions TEXT NOT NULL,
                recommendations TEXT NOT NULL,
                input TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_created
                ON assessments(created_at DESC);
            ",
        )?;

        Ok(())
    }

    fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
        let text: String = row.get(idx)?;
        serde_json::from_str(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn token_column<T>(
        row: &Row<'_>,
        idx: usize,
        column: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> rusqlite::Result<T> {
        let value: String = row.get(idx)?;
        parse(&value).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                Box::new(UnknownToken { column, value }),
            )
        })
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AssessmentRecord> {
        let score: Option<i64> = row.get(3)?;
        let created_at_str: String = row.get(7)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

        Ok(AssessmentRecord {
            id: row.get(0)?,
            kind: Self::token_column(row, 1, "kind", AssessmentKind::parse)?,
            level: Self::token_column(row, 2, "level", RiskLevel::parse)?,
            score: score.and_then(|s| u32::try_from(s).ok()),
            detected_conditions: Self::json_column(row, 4)?,
            recommendations: Self::json_column(row, 5)?,
            input: Self::json_column(row, 6)?,
            created_at,
        })
    }
}

impl AssessmentStore for SqliteAssessmentStore {
    type Error = StorageError;

    fn save(&self, record: &AssessmentRecord) -> Result<(), Self::Error> {
        let detected_conditions = serde_json::to_string(&record.detected_conditions)?;
        let recommendations = serde_json::to_string(&record.recommendations)?;
        let input = serde_json::to_string(&record.input)?;

        let conn = self.conn()?;
        conn.execute(
            r"
            INSERT INTO assessments (
                id, kind, level, score, detected_conditions,
                recommendations, input, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                record.id,
                record.kind.as_str(),
                record.level.as_str(),
                record.score.map(i64::from),
                detected_conditions,
                recommendations,
                input,
                record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;

        tracing::debug!(kind = record.kind.as_str(), "Saved assessment {}", record.id);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<AssessmentRecord>, Self::Error> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let record = stmt
            .query_row(params![id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    fn load_recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, Self::Error> {
        let (_, sql_limit) = Self::sql_bounds(0, limit)?;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))?;

        let records = stmt
            .query_map(params![sql_limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn load_page(&self, offset: usize, limit: usize) -> Result<RecordPage, Self::Error> {
        let (sql_offset, sql_limit) = Self::sql_bounds(offset, limit)?;
        let conn = self.conn()?;

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
        ))?;

        let records = stmt
            .query_map(params![sql_limit, sql_offset], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordPage::new(records, total_count as usize, offset, limit))
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn delete(&self, id: &str) -> Result<(), Self::Error> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM assessments WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM assessments", [])?;
        tracing::warn!("Cleared all assessments from storage");
        Ok(())
    }
}
