mod home;
mod leaderboard;
mod quiz;
mod results;
mod state;

#[cfg(test)]
pub(crate) mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use leaderboard::LeaderboardView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
