use std::fmt;

use chrono::{DateTime, Utc};
use quiz_core::model::{QuizSummary, ResponseValue, SessionId};

use super::markup::{TextMarkup, TextRenderRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Editable,
    ReviewOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    /// The last page was submitted.
    Submitted,
    /// The time budget ran out.
    TimeExpired,
}

/// Record of how and when a session finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub reason: CompletionReason,
    pub completed_at: DateTime<Utc>,
    pub summary: QuizSummary,
}

/// A value set or cleared on one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerChange {
    pub question_id: String,
    pub value: Option<ResponseValue>,
    pub mode: SessionMode,
}

/// Every state transition a session goes through, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Started { session_id: SessionId },
    PageChanged { from: usize, to: usize },
    AnswerChanged(AnswerChange),
    Completed(Completion),
    ModeChanged { from: SessionMode, to: SessionMode },
}

pub type EventHook = Box<dyn FnMut(&SessionEvent)>;
pub type AnswerChangedHook = Box<dyn FnMut(&AnswerChange)>;
pub type CompletedHook = Box<dyn FnMut(&Completion)>;
pub type TextRenderHook = Box<dyn Fn(&TextRenderRequest<'_>, &mut TextMarkup)>;

/// Callbacks registered on a session. Hooks of one kind run in registration order.
#[derive(Default)]
pub struct SessionHooks {
    events: Vec<EventHook>,
    answer_changed: Vec<AnswerChangedHook>,
    completed: Vec<CompletedHook>,
    text_render: Vec<TextRenderHook>,
}

impl SessionHooks {
    /// Observe every `SessionEvent`.
    pub fn subscribe(&mut self, hook: impl FnMut(&SessionEvent) + 'static) -> &mut Self {
        self.events.push(Box::new(hook));
        self
    }

    pub fn on_answer_changed(&mut self, hook: impl FnMut(&AnswerChange) + 'static) -> &mut Self {
        self.answer_changed.push(Box::new(hook));
        self
    }

    pub fn on_completed(&mut self, hook: impl FnMut(&Completion) + 'static) -> &mut Self {
        self.completed.push(Box::new(hook));
        self
    }

    /// Adjust markup for text about to be displayed. Runs after the built-in review
    /// markup, so a hook sees and may replace it.
    pub fn on_text_render(
        &mut self,
        hook: impl Fn(&TextRenderRequest<'_>, &mut TextMarkup) + 'static,
    ) -> &mut Self {
        self.text_render.push(Box::new(hook));
        self
    }

    pub(crate) fn emit(&mut self, event: &SessionEvent) {
        for hook in &mut self.events {
            hook(event);
        }
        match event {
            SessionEvent::AnswerChanged(change) => {
                for hook in &mut self.answer_changed {
                    hook(change);
                }
            }
            SessionEvent::Completed(completion) => {
                for hook in &mut self.completed {
                    hook(completion);
                }
            }
            SessionEvent::Started { .. }
            | SessionEvent::PageChanged { .. }
            | SessionEvent::ModeChanged { .. } => {}
        }
    }

    pub(crate) fn render_text(&self, request: &TextRenderRequest<'_>, markup: &mut TextMarkup) {
        for hook in &self.text_render {
            hook(request, markup);
        }
    }
}

impl fmt::Debug for SessionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHooks")
            .field("events", &self.events.len())
            .field("answer_changed", &self.answer_changed.len())
            .field("completed", &self.completed.len())
            .field("text_render", &self.text_render.len())
            .finish()
    }
}
