use services::{FinalizeOutcome, QuizService, QuizServiceError};
use trivia_core::model::{Question, QuizSession, TickOutcome};

/// Countdown turns amber at 30 seconds and red at 10.
const WARNING_SECONDS: u32 = 30;
const CRITICAL_SECONDS: u32 = 10;

/// Everything the quiz screen can do, funneled through one dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(u8),
    Next,
    Previous,
    Jump(usize),
    Tick,
    Submit,
}

/// What the view must do after an intent was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Continue,
    /// The session left `InProgress` (submit or expiry); finalize and
    /// navigate to the results screen.
    Finalize,
}

/// View-model over one quiz run. Applies UI intents to the session state
/// machine and carries the replay marker for clients that already completed
/// the quiz (replays run normally but are never recorded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    session: QuizSession,
    replay: bool,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession, replay: bool) -> Self {
        Self { session, replay }
    }

    #[must_use]
    pub fn is_replay(&self) -> bool {
        self.replay
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.session.is_in_progress()
    }

    /// Applies one intent. Guarded or out-of-range inputs fall through as
    /// no-ops inside the session.
    pub fn apply(&mut self, intent: QuizIntent) -> QuizStep {
        match intent {
            QuizIntent::Select(option) => {
                self.session.select_answer(option);
                QuizStep::Continue
            }
            QuizIntent::Next => {
                self.session.next();
                QuizStep::Continue
            }
            QuizIntent::Previous => {
                self.session.previous();
                QuizStep::Continue
            }
            QuizIntent::Jump(position) => {
                self.session.jump_to(position);
                QuizStep::Continue
            }
            QuizIntent::Tick => match self.session.tick() {
                TickOutcome::Expired => QuizStep::Finalize,
                TickOutcome::Running { .. } | TickOutcome::Stopped => QuizStep::Continue,
            },
            QuizIntent::Submit => {
                if self.session.submit() {
                    QuizStep::Finalize
                } else {
                    QuizStep::Continue
                }
            }
        }
    }

    /// Runs the service finalize over the owned session.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` when the session is not ready to finalize
    /// or the result blob cannot be encoded.
    pub async fn finalize(
        &mut self,
        quizzes: &QuizService,
    ) -> Result<FinalizeOutcome, QuizServiceError> {
        quizzes.finalize(&mut self.session).await
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.session.seconds_remaining()
    }

    #[must_use]
    pub fn countdown_class(&self) -> &'static str {
        let left = self.session.seconds_remaining();
        if left <= CRITICAL_SECONDS {
            "countdown countdown--critical"
        } else if left <= WARNING_SECONDS {
            "countdown countdown--warning"
        } else {
            "countdown"
        }
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.session.current_question()
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.session.current_position()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.session.answered_count()
    }

    /// Share of questions answered, for the progress bar.
    #[must_use]
    pub fn progress_percent(&self) -> usize {
        let total = self.session.total_questions();
        if total == 0 {
            0
        } else {
            self.session.answered_count() * 100 / total
        }
    }

    #[must_use]
    pub fn answer_at(&self, position: usize) -> Option<u8> {
        self.session.answer_at(position)
    }

    #[must_use]
    pub fn is_answered(&self, position: usize) -> bool {
        self.session.is_answered(position)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.session.is_in_progress() && self.session.current_position() > 0
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.can_submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{ALLOTTED_SECONDS, question_bank};

    fn vm() -> QuizVm {
        let session = QuizSession::new(question_bank(), ALLOTTED_SECONDS).unwrap();
        QuizVm::new(session, false)
    }

    #[test]
    fn select_unlocks_next() {
        let mut vm = vm();
        assert!(!vm.can_advance());
        assert_eq!(vm.apply(QuizIntent::Next), QuizStep::Continue);
        assert_eq!(vm.current_position(), 0);

        vm.apply(QuizIntent::Select(2));
        assert!(vm.can_advance());
        vm.apply(QuizIntent::Next);
        assert_eq!(vm.current_position(), 1);
        assert!(vm.can_go_back());
    }

    #[test]
    fn tick_expiry_requests_finalize() {
        let mut vm = vm();
        for _ in 0..ALLOTTED_SECONDS - 1 {
            assert_eq!(vm.apply(QuizIntent::Tick), QuizStep::Continue);
        }
        assert_eq!(vm.apply(QuizIntent::Tick), QuizStep::Finalize);
        assert!(!vm.is_in_progress());
        // A stray tick after the exit must not finalize twice.
        assert_eq!(vm.apply(QuizIntent::Tick), QuizStep::Continue);
    }

    #[test]
    fn submit_finalizes_only_when_all_answered() {
        let mut vm = vm();
        assert_eq!(vm.apply(QuizIntent::Submit), QuizStep::Continue);

        for position in 0..vm.total_questions() {
            vm.apply(QuizIntent::Jump(position));
            vm.apply(QuizIntent::Select(0));
        }
        assert_eq!(vm.progress_percent(), 100);
        assert!(vm.can_submit());
        assert_eq!(vm.apply(QuizIntent::Submit), QuizStep::Finalize);
    }

    #[test]
    fn countdown_class_follows_thresholds() {
        let mut vm = vm();
        assert_eq!(vm.countdown_class(), "countdown");
        while vm.seconds_remaining() > 30 {
            vm.apply(QuizIntent::Tick);
        }
        assert_eq!(vm.countdown_class(), "countdown countdown--warning");
        while vm.seconds_remaining() > 10 {
            vm.apply(QuizIntent::Tick);
        }
        assert_eq!(vm.countdown_class(), "countdown countdown--critical");
    }
}
