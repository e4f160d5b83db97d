#![forbid(unsafe_code)]

pub mod error;
mod keys;
pub mod leaderboard_service;
pub mod player_service;
pub mod quiz_service;

pub use trivia_core::Clock;

pub use error::{LeaderboardError, PlayerServiceError, QuizServiceError};
pub use leaderboard_service::LeaderboardService;
pub use player_service::{PlayerProfile, PlayerService};
pub use quiz_service::{FinalizeOutcome, QuizService};
