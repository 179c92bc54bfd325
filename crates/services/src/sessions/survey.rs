//! Page list in the shape survey renderers consume.

use serde::Serialize;

use quiz_core::model::{CorrectAnswer, QuestionKind, QuizQuestion};

use super::hooks::SessionMode;
use super::session::{DisplayConfig, PageLayout, ProgressBar, TimerPanel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    pub title: String,
    pub pages: Vec<SurveyPage>,
    pub mode: &'static str,
    pub questions_on_page_mode: &'static str,
    pub show_navigation_buttons: &'static str,
    pub show_progress_bar: &'static str,
    pub show_timer_panel: &'static str,
    pub show_completed_page: bool,
    pub first_page_is_started: bool,
    pub start_survey_text: String,
    pub max_time_to_finish: u64,
    pub max_time_to_finish_page: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyPage {
    pub elements: Vec<SurveyElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SurveyElement {
    #[serde(rename = "html")]
    Html { html: String },
    #[serde(rename = "radiogroup")]
    RadioGroup(QuestionElement),
    #[serde(rename = "checkbox")]
    Checkbox(QuestionElement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionElement {
    pub name: String,
    pub title: String,
    pub choices: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub choices_order: &'static str,
}

impl SurveyElement {
    /// `None` for a question without a declared answer; such questions cannot be graded.
    #[must_use]
    pub fn from_question(question: &QuizQuestion) -> Option<Self> {
        let element = QuestionElement {
            name: question.id().to_string(),
            title: question.title().to_string(),
            choices: question.choice_order().to_vec(),
            correct_answer: question.correct_answer()?.clone(),
            choices_order: "random",
        };
        Some(match question.kind() {
            QuestionKind::SingleSelect => SurveyElement::RadioGroup(element),
            QuestionKind::MultiSelect => SurveyElement::Checkbox(element),
        })
    }
}

impl SurveyDefinition {
    pub(crate) fn build<'q>(
        title: &str,
        intro_html: &str,
        display: &DisplayConfig,
        questions: impl IntoIterator<Item = &'q QuizQuestion>,
    ) -> Self {
        let mut pages = vec![SurveyPage {
            elements: vec![SurveyElement::Html {
                html: intro_html.to_string(),
            }],
        }];
        pages.extend(questions.into_iter().filter_map(|question| {
            SurveyElement::from_question(question).map(|element| SurveyPage {
                elements: vec![element],
            })
        }));

        Self {
            title: title.to_string(),
            pages,
            mode: match display.mode {
                SessionMode::Editable => "edit",
                SessionMode::ReviewOnly => "display",
            },
            questions_on_page_mode: match display.layout {
                PageLayout::Paged => "standard",
                PageLayout::SinglePage => "singlePage",
            },
            show_navigation_buttons: if display.show_navigation { "bottom" } else { "none" },
            show_progress_bar: match display.progress_bar {
                ProgressBar::Bottom => "bottom",
                ProgressBar::Off => "off",
            },
            show_timer_panel: match display.timer_panel {
                TimerPanel::Top => "top",
                TimerPanel::Hidden => "none",
            },
            show_completed_page: display.show_completed_page,
            first_page_is_started: true,
            start_survey_text: display.start_label.clone(),
            max_time_to_finish: display.time_limit_secs,
            max_time_to_finish_page: display.page_time_limit_secs,
        }
    }

    /// Serialize to the JSON document a survey renderer loads.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, QuestionRecord};

    fn question(id: u64, correct: &[&str]) -> QuizQuestion {
        QuizQuestion::from(QuestionRecord {
            id: QuestionId::new(id),
            title: format!("Q{id}"),
            category: String::new(),
            choices: vec!["A".into(), "B".into()],
            correct_answers: correct.iter().map(|c| (*c).to_string()).collect(),
        })
    }

    #[test]
    fn element_type_follows_question_kind() {
        for q in [question(1, &["A"]), question(2, &["A", "B"])] {
            let element = SurveyElement::from_question(&q).unwrap();
            let value = serde_json::to_value(&element).unwrap();
            assert_eq!(value["type"], q.kind().element_type());
            assert_eq!(value["name"], q.id());
            assert_eq!(value["choicesOrder"], "random");
        }
    }

    #[test]
    fn correct_answer_keeps_scalar_or_list_shape() {
        let single = serde_json::to_value(SurveyElement::from_question(&question(1, &["B"])).unwrap())
            .unwrap();
        assert_eq!(single["correctAnswer"], "B");

        let multi =
            serde_json::to_value(SurveyElement::from_question(&question(2, &["A", "B"])).unwrap())
                .unwrap();
        assert_eq!(multi["correctAnswer"], serde_json::json!(["A", "B"]));
    }
}
