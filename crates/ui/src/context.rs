use std::sync::Arc;

use services::{LeaderboardService, PlayerService, QuizService};

/// Services the views need, provided by the composition root.
pub trait UiApp: Send + Sync {
    fn players(&self) -> Arc<PlayerService>;
    fn quizzes(&self) -> Arc<QuizService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
}

#[derive(Clone)]
pub struct AppContext {
    players: Arc<PlayerService>,
    quizzes: Arc<QuizService>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            players: app.players(),
            quizzes: app.quizzes(),
            leaderboard: app.leaderboard(),
        }
    }

    #[must_use]
    pub fn players(&self) -> Arc<PlayerService> {
        Arc::clone(&self.players)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
