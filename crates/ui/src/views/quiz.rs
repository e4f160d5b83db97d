use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use services::QuizServiceError;
use trivia_core::model::OPTIONS_PER_QUESTION;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizStep, QuizVm, format_clock};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Everything the screen needs for one frame, cloned out of the view-model so
/// no signal borrow is held across the rsx tree.
#[derive(Clone, Debug, PartialEq)]
struct QuizDisplay {
    replay: bool,
    countdown_class: &'static str,
    clock_label: String,
    position: usize,
    total: usize,
    answered: usize,
    progress_percent: usize,
    question_text: String,
    options: [String; OPTIONS_PER_QUESTION],
    selected: Option<u8>,
    answered_flags: Vec<bool>,
    can_go_back: bool,
    can_advance: bool,
    can_submit: bool,
}

impl QuizDisplay {
    fn from_vm(vm: &QuizVm) -> Self {
        let question = vm.current_question();
        let answered_flags = (0..vm.total_questions())
            .map(|position| vm.is_answered(position))
            .collect();
        Self {
            replay: vm.is_replay(),
            countdown_class: vm.countdown_class(),
            clock_label: format_clock(vm.seconds_remaining()),
            position: vm.current_position(),
            total: vm.total_questions(),
            answered: vm.answered_count(),
            progress_percent: vm.progress_percent(),
            question_text: question.text().to_string(),
            options: question.options().clone(),
            selected: vm.answer_at(vm.current_position()),
            answered_flags,
            can_go_back: vm.can_go_back(),
            can_advance: vm.can_advance(),
            can_submit: vm.can_submit(),
        }
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quizzes = ctx.quizzes();
    let players = ctx.players();

    let vm = use_signal(|| None::<QuizVm>);
    let finalizing = use_signal(|| false);
    let mut leave_prompt = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);

    let quizzes_for_resource = quizzes.clone();
    let resource = use_resource(move || {
        let quizzes = quizzes_for_resource.clone();
        let mut vm = vm;
        async move {
            let started = match quizzes.start().await {
                Ok(session) => QuizVm::new(session, false),
                // An already-completed client replays; finalize will skip the
                // score write and the view says so up front.
                Err(QuizServiceError::AlreadyCompleted) => {
                    let session = quizzes.replay().await.map_err(|_| ViewError::Unknown)?;
                    QuizVm::new(session, true)
                }
                Err(QuizServiceError::NotRegistered) => return Err(ViewError::NotRegistered),
                Err(_) => return Err(ViewError::Unknown),
            };
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quizzes = quizzes.clone();
        use_callback(move |intent: QuizIntent| {
            let mut finalizing = finalizing;
            let mut error = error;
            let mut vm = vm;

            let step = {
                let mut guard = vm.write();
                let Some(vm_value) = guard.as_mut() else {
                    return;
                };
                vm_value.apply(intent)
            };

            if step == QuizStep::Finalize && !finalizing() {
                finalizing.set(true);
                let quizzes = quizzes.clone();
                spawn(async move {
                    let taken = vm.write().take();
                    let Some(mut vm_value) = taken else {
                        error.set(Some(ViewError::Unknown));
                        return;
                    };

                    let result = vm_value.finalize(&quizzes).await;

                    // Put the session back so the screen stays rendered while
                    // navigation happens.
                    {
                        let mut guard = vm.write();
                        *guard = Some(vm_value);
                    }

                    match result {
                        Ok(_) => {
                            let _ = navigator.push(Route::Results {});
                        }
                        Err(_) => {
                            error.set(Some(ViewError::Unknown));
                            finalizing.set(false);
                        }
                    }
                });
            }
        })
    };

    // One tick per second while the session is in progress. The loop ends the
    // moment the session leaves InProgress on any exit path.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            match vm.read().as_ref().map(QuizVm::is_in_progress) {
                Some(true) => {}
                Some(false) => break,
                None => continue,
            }
            dispatch_intent.call(QuizIntent::Tick);
        }
    });

    let on_confirm_leave = {
        let players = players.clone();
        use_callback(move |()| {
            let players = players.clone();
            spawn(async move {
                // Same as the start screen never having been filled in.
                let _ = players.clear().await;
                let _ = navigator.push(Route::Home {});
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let display = vm.read().as_ref().map(QuizDisplay::from_vm);

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err == ViewError::NotRegistered {
                        Link { class: "btn", to: Route::Home {}, "Go to start" }
                    } else {
                        button {
                            class: "btn btn--secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(display) = display {
                        header { class: "quiz-header",
                            span { class: "{display.countdown_class}", id: "quiz-countdown", "{display.clock_label}" }
                            span { class: "quiz-progress-label",
                                "Question {display.position + 1} of {display.total}"
                            }
                            span { class: "quiz-answered-label", "{display.answered} answered" }
                            button {
                                class: "btn btn--ghost",
                                id: "quiz-leave",
                                r#type: "button",
                                onclick: move |_| leave_prompt.set(true),
                                "Leave Quiz"
                            }
                        }
                        if display.replay {
                            p { class: "notice",
                                "You have already completed this quiz. Replays are not recorded."
                            }
                        }
                        if let Some(err) = *error.read() {
                            p { class: "form-error", "{err.message()}" }
                        }
                        div { class: "progress-track",
                            div {
                                class: "progress-fill",
                                style: "width: {display.progress_percent}%",
                            }
                        }
                        div { class: "card question-card",
                            h3 { class: "question-text", "{display.question_text}" }
                            div { class: "options",
                                for (index, label) in display.options.clone().into_iter().enumerate() {
                                    OptionButton {
                                        index: index as u8,
                                        label,
                                        selected: display.selected == Some(index as u8),
                                        on_intent: dispatch_intent,
                                    }
                                }
                            }
                        }
                        div { class: "quiz-nav",
                            button {
                                class: "btn btn--secondary",
                                id: "quiz-previous",
                                r#type: "button",
                                disabled: !display.can_go_back,
                                onclick: move |_| dispatch_intent.call(QuizIntent::Previous),
                                "Previous"
                            }
                            button {
                                class: "btn",
                                id: "quiz-next",
                                r#type: "button",
                                disabled: !display.can_advance,
                                onclick: move |_| dispatch_intent.call(QuizIntent::Next),
                                "Next"
                            }
                            button {
                                class: "btn btn--submit",
                                id: "quiz-submit",
                                r#type: "button",
                                disabled: !display.can_submit,
                                onclick: move |_| dispatch_intent.call(QuizIntent::Submit),
                                "Submit"
                            }
                        }
                        div { class: "overview-grid",
                            for (position, answered) in display.answered_flags.clone().into_iter().enumerate() {
                                button {
                                    class: if position == display.position {
                                        "grid-cell grid-cell--current"
                                    } else if answered {
                                        "grid-cell grid-cell--answered"
                                    } else {
                                        "grid-cell"
                                    },
                                    r#type: "button",
                                    onclick: move |_| dispatch_intent.call(QuizIntent::Jump(position)),
                                    "{position + 1}"
                                }
                            }
                        }
                        if finalizing() {
                            p { class: "notice", "Submitting..." }
                        }
                        if leave_prompt() {
                            div { class: "modal-backdrop",
                                div { class: "modal", role: "dialog", aria_modal: "true",
                                    h3 { "Leave the quiz?" }
                                    p { "Your progress will be lost." }
                                    div { class: "actions",
                                        button {
                                            class: "btn btn--secondary",
                                            id: "quiz-stay",
                                            r#type: "button",
                                            onclick: move |_| leave_prompt.set(false),
                                            "Stay"
                                        }
                                        button {
                                            class: "btn btn--danger",
                                            id: "quiz-confirm-leave",
                                            r#type: "button",
                                            onclick: move |_| on_confirm_leave.call(()),
                                            "Leave"
                                        }
                                    }
                                }
                            }
                        }
                    } else {
                        p { "Loading..." }
                    }
                },
            }
        }
    }
}

#[component]
fn OptionButton(
    index: u8,
    label: String,
    selected: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        button {
            class: if selected { "option option--selected" } else { "option" },
            id: "quiz-option-{index}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::Select(index)),
            "{label}"
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
