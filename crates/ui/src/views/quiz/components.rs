use dioxus::prelude::*;

use quiz_core::model::QuestionKind;
use services::{QuizProgress, TextMarkup};

use crate::vm::{QuestionVm, QuizIntent};

#[component]
pub(super) fn MarkupText(markup: TextMarkup) -> Element {
    match markup {
        TextMarkup::Plain(text) => rsx! {
            span { "{text}" }
        },
        TextMarkup::Emphasized(text) => rsx! {
            strong { class: "quiz-correct-choice", "{text}" }
        },
        TextMarkup::Marked {
            prefix,
            marker,
            color,
            rest,
        } => {
            let style = format!("color: {}", color.css());
            rsx! {
                span {
                    "{prefix}"
                    span { class: "quiz-verdict", style: "{style}", "{marker}" }
                    "{rest}"
                }
            }
        }
    }
}

#[component]
pub(super) fn QuestionCard(
    question: QuestionVm,
    read_only: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let input_type = match question.kind {
        QuestionKind::SingleSelect => "radio",
        QuestionKind::MultiSelect => "checkbox",
    };
    let hint = match question.kind {
        QuestionKind::SingleSelect => "Choose one answer.",
        QuestionKind::MultiSelect => "Choose every correct answer.",
    };
    let group = format!("question-{}", question.id);

    rsx! {
        fieldset { class: "quiz-question", id: "{group}", disabled: read_only,
            legend { class: "quiz-question__title",
                span { class: "quiz-question__number", "{question.number}. " }
                MarkupText { markup: question.title.clone() }
            }
            if !question.category.is_empty() {
                p { class: "quiz-question__category", "{question.category}" }
            }
            if !read_only {
                p { class: "quiz-question__hint", "{hint}" }
            }
            ul { class: "quiz-choices",
                {question.choices.iter().map(|choice| {
                    let question_id = question.id.clone();
                    let text = choice.text.clone();
                    rsx! {
                        li { key: "{choice.text}", class: "quiz-choice",
                            label {
                                input {
                                    r#type: input_type,
                                    name: "{group}",
                                    value: "{choice.text}",
                                    checked: choice.selected,
                                    disabled: read_only,
                                    onchange: move |_| {
                                        on_intent.call(QuizIntent::Choose {
                                            question_id: question_id.clone(),
                                            choice: text.clone(),
                                        });
                                    },
                                }
                                MarkupText { markup: choice.markup.clone() }
                            }
                        }
                    }
                })}
            }
        }
    }
}

#[component]
pub(super) fn ProgressFooter(progress: QuizProgress) -> Element {
    let percent = progress.percent();
    let label = match progress.current_question {
        Some(current) => format!(
            "Question {current} of {} · {} answered",
            progress.total, progress.answered
        ),
        None => format!("{} of {} answered", progress.answered, progress.total),
    };
    rsx! {
        footer { class: "quiz-progress",
            div { class: "quiz-progress__track",
                div { class: "quiz-progress__bar", style: "width: {percent}%" }
            }
            span { class: "quiz-progress__label", "{label}" }
        }
    }
}
