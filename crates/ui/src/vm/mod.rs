mod leaderboard_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use leaderboard_vm::{
    LeaderboardRowVm, PodiumEntryVm, avatar_for_gender, map_podium, map_ranked_rows,
};
pub use quiz_vm::{QuizIntent, QuizStep, QuizVm};
pub use results_vm::ResultsVm;
pub use time_fmt::{format_clock, format_datetime};
