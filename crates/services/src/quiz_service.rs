use std::sync::Arc;

use storage::repository::{ScoreRepository, SessionFlagsRepository};
use trivia_core::Clock;
use trivia_core::model::{ALLOTTED_SECONDS, FinalizedResult, QuizSession, question_bank};

use crate::error::QuizServiceError;
use crate::keys;

/// What happened when a session was finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// First completion on this client: the score write was attempted.
    /// `score_id` is `None` when the store was unreachable (best-effort).
    Recorded {
        score_id: Option<i64>,
        result: FinalizedResult,
    },
    /// The completion flag was already set; no second score was written but
    /// the caller still gets the result and proceeds to the results screen.
    AlreadyCompleted { result: FinalizedResult },
}

impl FinalizeOutcome {
    #[must_use]
    pub fn result(&self) -> &FinalizedResult {
        match self {
            FinalizeOutcome::Recorded { result, .. }
            | FinalizeOutcome::AlreadyCompleted { result } => result,
        }
    }
}

/// Orchestrates quiz runs: session start and the exactly-once finalize
/// boundary. The two finalize paths (manual submit and countdown expiry)
/// converge here; the persisted completion flag keeps the score write to one
/// per client regardless of which path fired, or whether both did.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    scores: Arc<dyn ScoreRepository>,
    flags: Arc<dyn SessionFlagsRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        scores: Arc<dyn ScoreRepository>,
        flags: Arc<dyn SessionFlagsRepository>,
    ) -> Self {
        Self {
            clock,
            scores,
            flags,
        }
    }

    /// Whether this client has already completed the quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on storage failures.
    pub async fn has_completed(&self) -> Result<bool, QuizServiceError> {
        let flag = self.flags.get_flag(keys::QUIZ_COMPLETED).await?;
        Ok(flag.as_deref() == Some(keys::COMPLETED_VALUE))
    }

    /// Starts a fresh session over the fixed question bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotRegistered` when no player name is
    /// stored and `QuizServiceError::AlreadyCompleted` when the completion
    /// flag is set.
    pub async fn start(&self) -> Result<QuizSession, QuizServiceError> {
        if self.flags.get_flag(keys::PLAYER_NAME).await?.is_none() {
            return Err(QuizServiceError::NotRegistered);
        }
        if self.has_completed().await? {
            return Err(QuizServiceError::AlreadyCompleted);
        }
        Ok(QuizSession::new(question_bank(), ALLOTTED_SECONDS)?)
    }

    /// A fresh session for a client that already completed the quiz. Replays
    /// are allowed but never recorded; `finalize` on the resulting session
    /// reports `AlreadyCompleted` and skips the score write.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotRegistered` when no player name is
    /// stored.
    pub async fn replay(&self) -> Result<QuizSession, QuizServiceError> {
        if self.flags.get_flag(keys::PLAYER_NAME).await?.is_none() {
            return Err(QuizServiceError::NotRegistered);
        }
        Ok(QuizSession::new(question_bank(), ALLOTTED_SECONDS)?)
    }

    /// Finalizes a session: snapshots the result, writes at most one score
    /// record for this client, and persists the result for the results
    /// screen.
    ///
    /// Storage failures after the snapshot are logged and swallowed; the
    /// player is navigated onward either way (best-effort policy, this is a
    /// casual quiz rather than a ledger).
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the session is not in the
    /// finalizing state (still in progress, or already finalized).
    pub async fn finalize(
        &self,
        session: &mut QuizSession,
    ) -> Result<FinalizeOutcome, QuizServiceError> {
        let result = session.finalize(self.clock.now())?;

        if self.completed_flag_lenient().await {
            tracing::info!("finalize on an already-completed client, skipping score write");
            return Ok(FinalizeOutcome::AlreadyCompleted { result });
        }

        let score_id = self.append_score_best_effort(&result).await;

        match serde_json::to_string(&result) {
            Ok(blob) => {
                if let Err(err) = self.flags.set_flag(keys::QUIZ_RESULT, &blob).await {
                    tracing::warn!(%err, "failed to persist finalized result");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to encode finalized result"),
        }
        if let Err(err) = self
            .flags
            .set_flag(keys::QUIZ_COMPLETED, keys::COMPLETED_VALUE)
            .await
        {
            tracing::warn!(%err, "failed to set completion flag");
        }

        Ok(FinalizeOutcome::Recorded { score_id, result })
    }

    /// The stored result for the results screen, if any.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::ResultBlob` when the stored blob does not
    /// parse and storage errors otherwise.
    pub async fn load_result(&self) -> Result<Option<FinalizedResult>, QuizServiceError> {
        let Some(blob) = self.flags.get_flag(keys::QUIZ_RESULT).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&blob)?))
    }

    /// Drops the stored result (leaving the results screen).
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on storage failures.
    pub async fn clear_result(&self) -> Result<(), QuizServiceError> {
        self.flags.remove_flag(keys::QUIZ_RESULT).await?;
        Ok(())
    }

    /// Completion-flag check that never blocks finalization: an unreadable
    /// flag store is reported as "not completed" and logged.
    async fn completed_flag_lenient(&self) -> bool {
        match self.flags.get_flag(keys::QUIZ_COMPLETED).await {
            Ok(flag) => flag.as_deref() == Some(keys::COMPLETED_VALUE),
            Err(err) => {
                tracing::warn!(%err, "could not read completion flag, assuming first run");
                false
            }
        }
    }

    async fn append_score_best_effort(&self, result: &FinalizedResult) -> Option<i64> {
        let name = match self.flags.get_flag(keys::PLAYER_NAME).await {
            Ok(name) => name.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "could not read player name, skipping score write");
                return None;
            }
        };
        let gender = match self.flags.get_flag(keys::PLAYER_GENDER).await {
            Ok(gender) => gender.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "could not read player gender, skipping score write");
                return None;
            }
        };

        let record = match result.score_record(name, gender) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(%err, "could not build score record, skipping write");
                return None;
            }
        };

        match self
            .scores
            .append_score(&record, result.completed_at())
            .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(%err, "score write failed, continuing without it");
                None
            }
        }
    }
}
