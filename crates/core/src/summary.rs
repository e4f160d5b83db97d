use std::fmt;

use crate::model::FinalizedResult;

/// How the elapsed time of a run is displayed on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedDisplay {
    /// The countdown ran out before submission.
    Expired,
    /// Seconds spent before a manual submit.
    Elapsed(u32),
}

impl fmt::Display for ElapsedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElapsedDisplay::Expired => f.write_str("Expired"),
            ElapsedDisplay::Elapsed(seconds) => {
                write!(f, "{}:{:02}", seconds / 60, seconds % 60)
            }
        }
    }
}

/// Color band for the score headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 80% and up.
    High,
    /// 60% to 79%.
    Medium,
    /// Below 60%.
    Low,
}

/// Everything the results screen shows, computed once from a finalized run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsSummary {
    total_questions: u32,
    answered: u32,
    correct: u32,
    score_percentage: u32,
    elapsed: ElapsedDisplay,
}

impl ResultsSummary {
    /// Derives the summary from a finalized result. `allotted_seconds` must
    /// be the same allotment the session ran with.
    #[must_use]
    pub fn from_result(result: &FinalizedResult, allotted_seconds: u32) -> Self {
        let total_questions = result.total_questions();
        let answered = result.answered_count();
        let correct = result.correct_count();

        let score_percentage = if total_questions == 0 {
            0
        } else {
            let ratio = f64::from(correct) * 100.0 / f64::from(total_questions);
            let rounded = ratio.round();
            if rounded.is_sign_negative() || rounded > f64::from(u32::MAX) {
                0
            } else {
                // Rounded percentage of a non-negative ratio fits u32.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    rounded as u32
                }
            }
        };

        let elapsed = match result.seconds_remaining() {
            _ if result.time_expired() => ElapsedDisplay::Expired,
            Some(remaining) => ElapsedDisplay::Elapsed(allotted_seconds.saturating_sub(remaining)),
            None => ElapsedDisplay::Expired,
        };

        Self {
            total_questions,
            answered,
            correct,
            score_percentage,
            elapsed,
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Answered but wrong. Unanswered questions are not counted here.
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.answered.saturating_sub(self.correct)
    }

    #[must_use]
    pub fn score_percentage(&self) -> u32 {
        self.score_percentage
    }

    #[must_use]
    pub fn elapsed(&self) -> ElapsedDisplay {
        self.elapsed
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        match self.score_percentage {
            80.. => ScoreBand::High,
            60..=79 => ScoreBand::Medium,
            _ => ScoreBand::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ALLOTTED_SECONDS, QuizSession, question_bank};
    use crate::time::fixed_now;

    fn finalized(correct: usize, ticks: u32, expire: bool) -> FinalizedResult {
        let mut session = QuizSession::new(question_bank(), ALLOTTED_SECONDS).unwrap();
        for position in 0..session.total_questions() {
            session.jump_to(position);
            let right = session.current_question().correct_option();
            let pick = if position < correct {
                right
            } else {
                (right + 1) % 4
            };
            session.select_answer(pick);
        }
        if expire {
            while session.is_in_progress() {
                session.tick();
            }
        } else {
            for _ in 0..ticks {
                session.tick();
            }
            assert!(session.submit());
        }
        session.finalize(fixed_now()).unwrap()
    }

    #[test]
    fn six_of_ten_submitted_with_45_left_reads_60_percent_in_15_seconds() {
        let result = finalized(6, 15, false);
        let summary = ResultsSummary::from_result(&result, ALLOTTED_SECONDS);

        assert_eq!(summary.score_percentage(), 60);
        assert_eq!(summary.correct(), 6);
        assert_eq!(summary.incorrect(), 4);
        assert_eq!(summary.elapsed().to_string(), "0:15");
        assert_eq!(summary.band(), ScoreBand::Medium);
    }

    #[test]
    fn expired_run_displays_expired() {
        let result = finalized(8, 0, true);
        let summary = ResultsSummary::from_result(&result, ALLOTTED_SECONDS);

        assert_eq!(summary.elapsed(), ElapsedDisplay::Expired);
        assert_eq!(summary.elapsed().to_string(), "Expired");
        assert_eq!(summary.band(), ScoreBand::High);
    }

    #[test]
    fn elapsed_seconds_are_zero_padded() {
        assert_eq!(ElapsedDisplay::Elapsed(5).to_string(), "0:05");
        assert_eq!(ElapsedDisplay::Elapsed(65).to_string(), "1:05");
        assert_eq!(ElapsedDisplay::Elapsed(0).to_string(), "0:00");
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let result = finalized(3, 1, false);
        let summary = ResultsSummary::from_result(&result, ALLOTTED_SECONDS);
        // 3/10 exact.
        assert_eq!(summary.score_percentage(), 30);
        assert_eq!(summary.band(), ScoreBand::Low);
    }
}
