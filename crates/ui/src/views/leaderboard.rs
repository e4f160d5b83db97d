use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, PodiumEntryVm, map_podium, map_ranked_rows};

#[derive(Clone, Debug, PartialEq)]
struct LeaderboardData {
    podium: Vec<PodiumEntryVm>,
    rows: Vec<LeaderboardRowVm>,
}

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let leaderboard = ctx.leaderboard();

    let resource = use_resource(move || {
        let leaderboard = leaderboard.clone();
        async move {
            let podium = leaderboard.podium().await.map_err(|_| ViewError::Unknown)?;
            let rest = leaderboard
                .ranked_from_fourth()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(LeaderboardData {
                podium: map_podium(&podium),
                rows: map_ranked_rows(&rest),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page leaderboard-page",
            h2 { "Leaderboard" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    if data.podium.is_empty() {
                        p { class: "empty-state", "No scores yet. Be the first on the board!" }
                    } else {
                        div { class: "podium",
                            for entry in data.podium {
                                PodiumSlot { entry }
                            }
                        }
                        if !data.rows.is_empty() {
                            ol { class: "ranked-list", start: 4,
                                for row in data.rows {
                                    RankedRow { row }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn PodiumSlot(entry: PodiumEntryVm) -> Element {
    rsx! {
        div { class: "podium-slot podium-slot--{entry.place}",
            span { class: "podium-avatar", "{entry.avatar}" }
            span { class: "podium-name", "{entry.first_name}" }
            span { class: "podium-points", "{entry.points} points" }
        }
    }
}

#[component]
fn RankedRow(row: LeaderboardRowVm) -> Element {
    rsx! {
        li { class: "ranked-row",
            span { class: "ranked-rank", "#{row.rank}" }
            span { class: "ranked-avatar", "{row.avatar}" }
            span { class: "ranked-name", "{row.name}" }
            span { class: "ranked-points", "{row.points} points" }
        }
    }
}
