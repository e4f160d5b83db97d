use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{LeaderboardService, PlayerService, QuizService};
use storage::repository::{InMemoryRepository, ScoreRepository, SessionFlagsRepository};
use trivia_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, LeaderboardView, QuizView, ResultsView};

#[derive(Clone)]
struct TestApp {
    players: Arc<PlayerService>,
    quizzes: Arc<QuizService>,
    leaderboard: Arc<LeaderboardService>,
}

impl UiApp for TestApp {
    fn players(&self) -> Arc<PlayerService> {
        Arc::clone(&self.players)
    }

    fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Results,
    Leaderboard,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub players: Arc<PlayerService>,
    pub quizzes: Arc<QuizService>,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Flushes pending signal writes without a full rebuild.
    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let repo = InMemoryRepository::new();
    let scores: Arc<dyn ScoreRepository> = Arc::new(repo.clone());
    let flags: Arc<dyn SessionFlagsRepository> = Arc::new(repo.clone());
    setup_view_harness_with_stores(view, repo, scores, flags)
}

pub fn setup_view_harness_with_stores(
    view: ViewKind,
    repo: InMemoryRepository,
    scores: Arc<dyn ScoreRepository>,
    flags: Arc<dyn SessionFlagsRepository>,
) -> ViewHarness {
    let clock = fixed_clock();
    let players = Arc::new(PlayerService::new(Arc::clone(&flags)));
    let quizzes = Arc::new(QuizService::new(
        clock,
        Arc::clone(&scores),
        Arc::clone(&flags),
    ));
    let leaderboard = Arc::new(LeaderboardService::new(scores));

    let quiz_handles = matches!(view, ViewKind::Quiz).then(QuizTestHandles::default);
    let app = Arc::new(TestApp {
        players: Arc::clone(&players),
        quizzes: Arc::clone(&quizzes),
        leaderboard,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        repo,
        players,
        quizzes,
        quiz_handles,
    }
}
