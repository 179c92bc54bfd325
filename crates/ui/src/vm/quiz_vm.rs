use std::cell::RefCell;
use std::rc::Rc;

use quiz_core::model::{QuestionKind, QuizQuestion};
use quiz_core::time::format_countdown;
use services::{
    CompletionReason, Page, ProgressBar, QuizError, QuizLoopService, QuizProgress, QuizSession,
    SessionEvent, TextMarkup, TextRenderRequest, TimerPanel, TimerState,
};
use tracing::{debug, error, warn};

use crate::vm::markdown_to_html;
use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Choose { question_id: String, choice: String },
    Next,
    Prev,
    Submit,
    /// One second of wall-clock time passed.
    Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub text: String,
    pub markup: TextMarkup,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: String,
    pub number: usize,
    pub category: String,
    pub title: TextMarkup,
    pub kind: QuestionKind,
    pub choices: Vec<ChoiceVm>,
}

/// What the quiz page shows right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Intro {
        html: String,
        start_label: String,
    },
    Question {
        question: QuestionVm,
        can_go_back: bool,
        is_last: bool,
    },
    Review {
        questions: Vec<QuestionVm>,
        score_label: String,
    },
}

pub struct QuizVm {
    session: QuizSession,
    announcement: Rc<RefCell<Option<String>>>,
}

impl QuizVm {
    #[must_use]
    pub fn new(mut session: QuizSession) -> Self {
        let announcement = Rc::new(RefCell::new(None));
        let total = session.questions().len();
        {
            let announcement = Rc::clone(&announcement);
            session.hooks_mut().subscribe(move |event| {
                debug!(?event, "quiz event");
                let message = match event {
                    SessionEvent::PageChanged { to, .. } => {
                        Some(format!("Question {to} of {total}"))
                    }
                    SessionEvent::Completed(completion) => Some(
                        match completion.reason {
                            CompletionReason::Submitted => {
                                "Quiz submitted. Review your answers below."
                            }
                            CompletionReason::TimeExpired => {
                                "Time is up. Review your answers below."
                            }
                        }
                        .to_string(),
                    ),
                    _ => None,
                };
                if let Some(message) = message {
                    *announcement.borrow_mut() = Some(message);
                }
            });
        }
        Self {
            session,
            announcement,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.session.settings().title
    }

    /// Latest status line for the live region.
    #[must_use]
    pub fn announcement(&self) -> Option<String> {
        self.announcement.borrow().clone()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        matches!(self.session.timer_state(), TimerState::Running { .. })
    }

    #[must_use]
    pub fn timer_label(&self) -> Option<String> {
        if self.session.display().timer_panel != TimerPanel::Top {
            return None;
        }
        match self.session.timer_state() {
            TimerState::Running { remaining_secs } => {
                Some(format!("Time left: {}", format_countdown(remaining_secs)))
            }
            TimerState::Expired => Some("Time left: 0:00".to_string()),
            TimerState::Off => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        let shown = self.session.display().progress_bar == ProgressBar::Bottom
            && self.session.is_started();
        shown.then(|| self.session.progress())
    }

    #[must_use]
    pub fn show_navigation(&self) -> bool {
        self.session.display().show_navigation
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        if let Some(completion) = self.session.completion() {
            let summary = completion.summary;
            return QuizScreen::Review {
                questions: self
                    .session
                    .questions()
                    .iter()
                    .enumerate()
                    .map(|(index, question)| self.question_vm(index + 1, question))
                    .collect(),
                score_label: format!(
                    "Score: {} / {} ({}%)",
                    summary.correct,
                    summary.total,
                    summary.percent_correct()
                ),
            };
        }

        match self.session.current_page() {
            Page::Intro { html } => QuizScreen::Intro {
                html: markdown_to_html(html),
                start_label: self.session.settings().start_label.clone(),
            },
            Page::Question { index } => {
                let question = &self.session.questions()[*index];
                QuizScreen::Question {
                    question: self.question_vm(index + 1, question),
                    can_go_back: *index > 0,
                    is_last: self.session.is_last_page(),
                }
            }
        }
    }

    fn question_vm(&self, number: usize, question: &QuizQuestion) -> QuestionVm {
        let id = question.id();
        let answer = self.session.answer(id);
        QuestionVm {
            id: id.to_string(),
            number,
            category: question.category().to_string(),
            title: self
                .session
                .render_text(&TextRenderRequest::for_question(id, question.title())),
            kind: question.kind(),
            choices: question
                .choice_order()
                .iter()
                .map(|choice| ChoiceVm {
                    text: choice.clone(),
                    markup: self
                        .session
                        .render_text(&TextRenderRequest::for_question(id, choice)),
                    selected: answer.is_some_and(|value| value.contains(choice)),
                })
                .collect(),
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the session rejects the intent.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<(), ViewError> {
        let result = match &intent {
            QuizIntent::Start => self.session.start(),
            QuizIntent::Choose {
                question_id,
                choice,
            } => self.session.toggle_choice(question_id, choice),
            QuizIntent::Next => self.session.next_page().map(|_| ()),
            QuizIntent::Prev => self.session.prev_page().map(|_| ()),
            QuizIntent::Submit => self.session.submit().map(|_| ()),
            QuizIntent::Tick => {
                if self.session.tick(1) == TimerState::Expired {
                    self.session.expire().map(|_| ())
                } else {
                    Ok(())
                }
            }
        };
        result.map_err(|err| {
            warn!(%err, ?intent, "quiz intent rejected");
            ViewError::Unknown
        })
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyBank` when no usable questions exist.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    match quiz_loop.start_quiz().await {
        Ok(session) => Ok(QuizVm::new(session)),
        Err(QuizError::EmptyBank) => {
            warn!("question bank has no usable questions");
            Err(ViewError::EmptyBank)
        }
        Err(err) => {
            error!(%err, "failed to load question bank");
            Err(ViewError::Unknown)
        }
    }
}
