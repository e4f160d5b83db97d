//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use trivia_core::model::QuizError;

/// Errors emitted by `PlayerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerServiceError {
    #[error("player name is empty")]
    EmptyName,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("no registered player on this client")]
    NotRegistered,
    #[error("quiz already completed on this client")]
    AlreadyCompleted,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("stored result is unreadable: {0}")]
    ResultBlob(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
