use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::ScoreRecord;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a score: the store-assigned row id, the insertion
/// timestamp, and the domain record. The id is opaque and unused downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub record: ScoreRecord,
}

/// Append-only score store backing the leaderboard.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Append one score record, returning the generated identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_score(
        &self,
        record: &ScoreRecord,
        recorded_at: DateTime<Utc>,
    ) -> Result<i64, StorageError>;

    /// All stored scores, most-recently-recorded first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing fails.
    async fn list_scores(&self) -> Result<Vec<ScoreRow>, StorageError>;
}

/// Per-client string store for session flags (player identity, completion
/// marker, finalized-result blob). Survives restarts.
#[async_trait]
pub trait SessionFlagsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails; a missing key is `None`.
    async fn get_flag(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_flag(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a flag; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn remove_flag(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    scores: Arc<Mutex<Vec<ScoreRow>>>,
    flags: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn append_score(
        &self,
        record: &ScoreRecord,
        recorded_at: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = i64::try_from(guard.len()).unwrap_or(i64::MAX) + 1;
        guard.push(ScoreRow {
            id,
            recorded_at,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn list_scores(&self) -> Result<Vec<ScoreRow>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl SessionFlagsRepository for InMemoryRepository {
    async fn get_flag(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_flag(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_flag(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the score store and session flags behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
    pub flags: Arc<dyn SessionFlagsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let scores: Arc<dyn ScoreRepository> = Arc::new(repo.clone());
        let flags: Arc<dyn SessionFlagsRepository> = Arc::new(repo);
        Self { scores, flags }
    }
}
