use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, LeaderboardView, QuizView, ResultsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/results", ResultsView)] Results {},
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        nav { class: "header",
            h1 { "Trivia Quiz" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Leaderboard {}, "Leaderboard" } }
            }
        }
    }
}
