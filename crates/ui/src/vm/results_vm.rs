use trivia_core::model::{ALLOTTED_SECONDS, FinalizedResult};
use trivia_core::summary::{ResultsSummary, ScoreBand};

use crate::vm::time_fmt::format_datetime;

/// Display-ready results screen data, computed once from the stored result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage_label: String,
    pub band_class: &'static str,
    pub headline: &'static str,
    pub correct: u32,
    pub incorrect: u32,
    pub answered: u32,
    pub total: u32,
    pub time_label: String,
    pub time_expired: bool,
    pub completed_at_label: String,
}

impl From<&FinalizedResult> for ResultsVm {
    fn from(result: &FinalizedResult) -> Self {
        let summary = ResultsSummary::from_result(result, ALLOTTED_SECONDS);
        let (band_class, headline) = match summary.band() {
            ScoreBand::High => ("score score--high", "Excellent work!"),
            ScoreBand::Medium => ("score score--medium", "Good effort!"),
            ScoreBand::Low => ("score score--low", "Keep practicing!"),
        };
        Self {
            percentage_label: format!("{}%", summary.score_percentage()),
            band_class,
            headline,
            correct: summary.correct(),
            incorrect: summary.incorrect(),
            answered: summary.answered(),
            total: summary.total_questions(),
            time_label: summary.elapsed().to_string(),
            time_expired: result.time_expired(),
            completed_at_label: format_datetime(result.completed_at()),
        }
    }
}
