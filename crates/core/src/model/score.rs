use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreRecordError {
    #[error("player name is empty")]
    EmptyName,

    #[error("score ({score}) exceeds answered count ({answered})")]
    ScoreExceedsAnswered { score: u32, answered: u32 },
}

/// One leaderboard entry: who played, how many answers they locked in, and
/// how many of those were correct. Append-only; never updated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    name: String,
    score: u32,
    answered: u32,
    gender: String,
}

impl ScoreRecord {
    /// Builds a score record, enforcing `score <= answered`.
    ///
    /// # Errors
    ///
    /// Returns `ScoreRecordError::EmptyName` if the name is blank and
    /// `ScoreRecordError::ScoreExceedsAnswered` if the counts are inconsistent.
    pub fn new(
        name: impl Into<String>,
        score: u32,
        answered: u32,
        gender: impl Into<String>,
    ) -> Result<Self, ScoreRecordError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoreRecordError::EmptyName);
        }
        if score > answered {
            return Err(ScoreRecordError::ScoreExceedsAnswered { score, answered });
        }
        Ok(Self {
            name,
            score,
            answered,
            gender: gender.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First word of the name, used on the podium.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn gender(&self) -> &str {
        &self.gender
    }
}
