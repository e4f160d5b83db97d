use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::question::{OPTIONS_PER_QUESTION, Question};
use super::score::{ScoreRecord, ScoreRecordError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot start a quiz without questions")]
    NoQuestions,

    #[error("finalize called while the session is still in progress")]
    StillInProgress,

    #[error("session is already finalized")]
    AlreadyFinalized,
}

/// Where a session sits in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress,
    Finalizing,
    Finalized,
}

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown still running.
    Running { seconds_remaining: u32 },
    /// The countdown hit zero on this tick; the session moved to `Finalizing`.
    Expired,
    /// The session has already left `InProgress`; the caller must stop ticking.
    Stopped,
}

/// In-memory state machine for one timed quiz run.
///
/// Holds the fixed question list, the per-question selections, the navigation
/// cursor, and the countdown. All mutations are explicit transitions; the
/// countdown is driven by an external scheduler calling [`QuizSession::tick`]
/// once per elapsed second. Invalid inputs (out-of-range options or
/// positions, guarded navigation) are no-ops rather than errors, because the
/// only entry points are bounded controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<u8>>,
    current: usize,
    seconds_remaining: u32,
    allotted_seconds: u32,
    time_expired: bool,
    phase: QuizPhase,
}

impl QuizSession {
    /// Starts a session over the given questions with a full countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if the question list is empty.
    pub fn new(questions: Vec<Question>, allotted_seconds: u32) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            current: 0,
            seconds_remaining: allotted_seconds,
            allotted_seconds,
            time_expired: false,
            phase: QuizPhase::InProgress,
        })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.phase == QuizPhase::InProgress
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.current
    }

    /// The question under the navigation cursor.
    ///
    /// # Panics
    ///
    /// Never panics: `current` stays within bounds by construction.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    #[must_use]
    pub fn answer_at(&self, position: usize) -> Option<u8> {
        self.answers.get(position).copied().flatten()
    }

    #[must_use]
    pub fn is_answered(&self, position: usize) -> bool {
        self.answer_at(position).is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.answered_count() == self.questions.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .count()
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[must_use]
    pub fn allotted_seconds(&self) -> u32 {
        self.allotted_seconds
    }

    /// Selects an option for the current question, overwriting any earlier
    /// choice. No-op once the session has left `InProgress` or if the option
    /// index is out of range.
    pub fn select_answer(&mut self, option: u8) {
        if self.phase != QuizPhase::InProgress {
            return;
        }
        if usize::from(option) >= OPTIONS_PER_QUESTION {
            return;
        }
        self.answers[self.current] = Some(option);
    }

    /// Direct jump from the overview grid; always permitted in progress for
    /// any in-range position.
    pub fn jump_to(&mut self, position: usize) {
        if self.phase != QuizPhase::InProgress || position >= self.questions.len() {
            return;
        }
        self.current = position;
    }

    /// Whether sequential advance is currently allowed: the current question
    /// must be answered first, and there must be a next question.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == QuizPhase::InProgress
            && self.answers[self.current].is_some()
            && self.current + 1 < self.questions.len()
    }

    /// Sequential advance, guarded by the answer lock.
    pub fn next(&mut self) {
        if self.can_advance() {
            self.current += 1;
        }
    }

    /// Step back one question; no-op at the first.
    pub fn previous(&mut self) {
        if self.phase == QuizPhase::InProgress && self.current > 0 {
            self.current -= 1;
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Once the countdown reaches zero the session transitions to
    /// `Finalizing` with the time-expired marker set, and every later call
    /// reports [`TickOutcome::Stopped`] without touching state.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != QuizPhase::InProgress {
            return TickOutcome::Stopped;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.time_expired = true;
            self.phase = QuizPhase::Finalizing;
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            seconds_remaining: self.seconds_remaining,
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::InProgress && self.all_answered()
    }

    /// Manual submission. Only accepted while in progress with every question
    /// answered; the remaining seconds at call time are kept for the result.
    ///
    /// Returns whether the submission was accepted.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.phase = QuizPhase::Finalizing;
        true
    }

    /// Locks in the answers and produces the immutable result snapshot.
    ///
    /// Valid exactly once, after `submit()` or an expiring `tick()` moved the
    /// session to `Finalizing`. The session ends up `Finalized` and accepts
    /// no further mutations.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StillInProgress` if neither exit path has run yet
    /// and `QuizError::AlreadyFinalized` on a repeated call.
    pub fn finalize(&mut self, completed_at: DateTime<Utc>) -> Result<FinalizedResult, QuizError> {
        match self.phase {
            QuizPhase::InProgress => Err(QuizError::StillInProgress),
            QuizPhase::Finalized => Err(QuizError::AlreadyFinalized),
            QuizPhase::Finalizing => {
                self.phase = QuizPhase::Finalized;
                Ok(FinalizedResult {
                    answers: self.answers.clone(),
                    questions: self.questions.clone(),
                    time_expired: self.time_expired,
                    completed_at,
                    seconds_remaining: (!self.time_expired).then_some(self.seconds_remaining),
                })
            }
        }
    }
}

/// Immutable snapshot of a finished quiz run, persisted for the results
/// screen. `seconds_remaining` is present only when the player submitted
/// before the countdown expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedResult {
    answers: Vec<Option<u8>>,
    questions: Vec<Question>,
    time_expired: bool,
    completed_at: DateTime<Utc>,
    seconds_remaining: Option<u32>,
}

impl FinalizedResult {
    #[must_use]
    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> Option<u32> {
        self.seconds_remaining
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        let count = self.answers.iter().filter(|slot| slot.is_some()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let count = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Builds the leaderboard entry for this result.
    ///
    /// # Errors
    ///
    /// Returns `ScoreRecordError` if the player name is blank; the count
    /// invariant holds by construction.
    pub fn score_record(
        &self,
        name: impl Into<String>,
        gender: impl Into<String>,
    ) -> Result<ScoreRecord, ScoreRecordError> {
        ScoreRecord::new(name, self.correct_count(), self.answered_count(), gender)
    }
}
