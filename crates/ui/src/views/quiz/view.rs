use std::time::Duration;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizScreen, QuizVm, start_quiz};

use super::components::{ProgressFooter, QuestionCard};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let fallback_title = ctx.settings().title.clone();

    let vm = use_signal(|| None::<QuizVm>);
    let error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut vm = vm;
        async move {
            let started = start_quiz(&quiz_loop).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut error = error;
        if intent == QuizIntent::Tick && !vm.read().as_ref().is_some_and(QuizVm::is_timer_running) {
            return;
        }
        let mut guard = vm.write();
        let Some(current) = guard.as_mut() else {
            return;
        };
        error.set(current.apply(intent).err());
    });

    use_future(move || async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            dispatch.call(QuizIntent::Tick);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let vm_guard = vm.read();
    let title = vm_guard
        .as_ref()
        .map_or(fallback_title, |vm| vm.title().to_string());
    let screen = vm_guard.as_ref().map(QuizVm::screen);
    let timer_label = vm_guard.as_ref().and_then(QuizVm::timer_label);
    let progress = vm_guard.as_ref().and_then(QuizVm::progress);
    let show_navigation = vm_guard.as_ref().is_some_and(QuizVm::show_navigation);
    let announcement = vm_guard.as_ref().and_then(QuizVm::announcement);
    drop(vm_guard);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root",
            header { class: "quiz-header",
                h1 { class: "quiz-header__title", "{title}" }
                if let Some(label) = timer_label {
                    span { class: "quiz-timer", id: "quiz-timer", "{label}" }
                }
            }
            p { class: "quiz-status", role: "status", aria_live: "polite",
                {announcement.unwrap_or_default()}
            }
            main { class: "quiz-body",
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "quiz-loading", "Loading questions..." }
                    },
                    ViewState::Error(ViewError::EmptyBank) => rsx! {
                        p { class: "quiz-empty", "{ViewError::EmptyBank.message()}" }
                    },
                    ViewState::Error(_) => rsx! {
                        p { class: "quiz-loading", "Loading questions..." }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(err) = *error.read() {
                            p { class: "quiz-error", "{err.message()}" }
                        }
                        match screen {
                            Some(QuizScreen::Intro { html, start_label }) => rsx! {
                                section { class: "quiz-intro",
                                    div { class: "quiz-intro__text", dangerous_inner_html: "{html}" }
                                    button {
                                        class: "btn btn-primary",
                                        id: "quiz-start",
                                        r#type: "button",
                                        onclick: move |_| dispatch.call(QuizIntent::Start),
                                        "{start_label}"
                                    }
                                }
                            },
                            Some(QuizScreen::Question { question, can_go_back, is_last }) => rsx! {
                                QuestionCard { question, read_only: false, on_intent: dispatch }
                                if show_navigation {
                                    nav { class: "quiz-nav",
                                        button {
                                            class: "btn btn-secondary",
                                            id: "quiz-prev",
                                            r#type: "button",
                                            disabled: !can_go_back,
                                            onclick: move |_| dispatch.call(QuizIntent::Prev),
                                            "Previous"
                                        }
                                        button {
                                            class: "btn btn-primary",
                                            id: "quiz-next",
                                            r#type: "button",
                                            onclick: move |_| dispatch.call(QuizIntent::Submit),
                                            if is_last { "Complete" } else { "Next" }
                                        }
                                    }
                                }
                            },
                            Some(QuizScreen::Review { questions, score_label }) => rsx! {
                                section { class: "quiz-review",
                                    h2 { class: "quiz-review__score", "{score_label}" }
                                    for question in questions {
                                        QuestionCard {
                                            key: "{question.id}",
                                            question: question.clone(),
                                            read_only: true,
                                            on_intent: dispatch,
                                        }
                                    }
                                }
                            },
                            None => rsx! {
                                p { class: "quiz-loading", "Loading questions..." }
                            },
                        }
                    },
                }
            }
            if let Some(progress) = progress {
                ProgressFooter { progress }
            }
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
