use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::ResultsVm;

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quizzes = ctx.quizzes();
    let players = ctx.players();

    let quizzes_for_resource = quizzes.clone();
    let resource = use_resource(move || {
        let quizzes = quizzes_for_resource.clone();
        async move {
            let result = quizzes.load_result().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(result.as_ref().map(ResultsVm::from))
        }
    });
    let state = view_state_from_resource(&resource);

    let on_play_again = {
        let quizzes = quizzes.clone();
        use_callback(move |()| {
            let quizzes = quizzes.clone();
            spawn(async move {
                let _ = quizzes.clear_result().await;
                let _ = navigator.push(Route::Quiz {});
            });
        })
    };

    let on_go_home = {
        let quizzes = quizzes.clone();
        let players = players.clone();
        use_callback(move |()| {
            let quizzes = quizzes.clone();
            let players = players.clone();
            spawn(async move {
                let _ = quizzes.clear_result().await;
                let _ = players.clear().await;
                let _ = navigator.push(Route::Home {});
            });
        })
    };

    rsx! {
        div { class: "page results-page",
            h2 { "Your Results" }

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
                ViewState::Ready(None) => rsx! {
                    div { class: "card card--empty",
                        p { "No results found." }
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Home {});
                            },
                            "Back to Home"
                        }
                    }
                },
                ViewState::Ready(Some(vm)) => rsx! {
                    div { class: "card results-card",
                        span { class: "{vm.band_class}", id: "results-percentage", "{vm.percentage_label}" }
                        h3 { "{vm.headline}" }
                        dl { class: "results-stats",
                            dt { "Correct" }
                            dd { id: "results-correct", "{vm.correct}" }
                            dt { "Incorrect" }
                            dd { id: "results-incorrect", "{vm.incorrect}" }
                            dt { "Answered" }
                            dd { "{vm.answered} of {vm.total}" }
                            dt { "Time" }
                            dd { id: "results-time", "{vm.time_label}" }
                        }
                        if vm.time_expired {
                            p { class: "notice", "Time ran out before you submitted." }
                        }
                        p { class: "results-completed-at", "Completed {vm.completed_at_label}" }
                        div { class: "actions",
                            button {
                                class: "btn",
                                id: "results-play-again",
                                r#type: "button",
                                onclick: move |_| on_play_again.call(()),
                                "Play Again"
                            }
                            button {
                                class: "btn btn--secondary",
                                id: "results-go-home",
                                r#type: "button",
                                onclick: move |_| on_go_home.call(()),
                                "Back to Home"
                            }
                        }
                    }
                },
            }
        }
    }
}
