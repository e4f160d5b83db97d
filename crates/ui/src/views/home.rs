use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use services::PlayerServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    registered_name: Option<String>,
    registered_gender: Option<String>,
    completed: bool,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let players = ctx.players();

    let mut name = use_signal(String::new);
    let mut gender = use_signal(|| "female".to_string());
    let submit_error = use_signal(|| None::<&'static str>);
    let mut seeded = use_signal(|| false);

    let players_for_resource = players.clone();
    let quizzes = ctx.quizzes();
    let resource = use_resource(move || {
        let players = players_for_resource.clone();
        let quizzes = quizzes.clone();
        async move {
            let profile = players.load().await.map_err(|_| ViewError::Unknown)?;
            let completed = quizzes
                .has_completed()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(HomeData {
                registered_name: profile.as_ref().map(|profile| profile.name.clone()),
                registered_gender: profile.map(|profile| profile.gender),
                completed,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    // Prefill the form once from a stored profile.
    if let ViewState::Ready(data) = &state {
        if !seeded() {
            seeded.set(true);
            if let Some(stored) = &data.registered_name {
                name.set(stored.clone());
            }
            if let Some(stored) = &data.registered_gender {
                if !stored.is_empty() {
                    gender.set(stored.clone());
                }
            }
        }
    }

    let on_start = {
        let players = players.clone();
        use_callback(move |()| {
            let players = players.clone();
            let name_value = name();
            let gender_value = gender();
            let mut submit_error = submit_error;
            spawn(async move {
                match players.register(&name_value, &gender_value).await {
                    Ok(()) => {
                        let _ = navigator.push(Route::Quiz {});
                    }
                    Err(PlayerServiceError::EmptyName) => {
                        submit_error.set(Some("Please enter your name first."));
                    }
                    Err(_) => submit_error.set(Some(ViewError::Unknown.message())),
                }
            });
        })
    };

    rsx! {
        div { class: "page home-page",
            h2 { "Ready to play?" }

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
                    if data.completed {
                        div { class: "card card--completed",
                            h3 { "You have already completed the quiz" }
                            p { "Scores are recorded once per player. Check your results or see where you placed." }
                            div { class: "actions",
                                Link { class: "btn", to: Route::Results {}, "View Results" }
                                Link { class: "btn btn--secondary", to: Route::Leaderboard {}, "Leaderboard" }
                            }
                        }
                    } else {
                        form {
                            class: "card start-form",
                            onsubmit: move |evt| {
                                evt.prevent_default();
                                on_start.call(());
                            },
                            label { r#for: "player-name", "Your name" }
                            input {
                                id: "player-name",
                                placeholder: "Enter your name",
                                value: "{name}",
                                oninput: move |evt| name.set(evt.value()),
                            }
                            label { r#for: "player-gender", "Gender" }
                            select {
                                id: "player-gender",
                                value: "{gender}",
                                onchange: move |evt| gender.set(evt.value()),
                                option { value: "female", "Female" }
                                option { value: "male", "Male" }
                            }
                            if let Some(message) = submit_error() {
                                p { class: "form-error", "{message}" }
                            }
                            button { class: "btn", id: "start-quiz", r#type: "submit", "Start Quiz" }
                        }
                        ul { class: "rules",
                            li { "60 seconds for all 10 questions; the quiz submits itself when time runs out." }
                            li { "Each question has four options. You can change your pick until you submit." }
                            li { "Next unlocks after you answer. The overview grid jumps anywhere." }
                            li { "Submit becomes available once every question is answered." }
                        }
                    }
                },
            }
        }
    }
}
