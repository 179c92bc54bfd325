mod hooks;
mod markup;
mod progress;
mod review;
mod session;
mod survey;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use hooks::{
    AnswerChange, AnswerChangedHook, CompletedHook, Completion, CompletionReason, EventHook,
    SessionEvent, SessionHooks, SessionMode, TextRenderHook,
};
pub use markup::{MarkerColor, TextMarkup, TextRenderRequest};
pub use progress::QuizProgress;
pub use review::{ReviewRenderer, colorize_verdict};
pub use session::{
    DisplayConfig, Page, PageLayout, ProgressBar, QuizSession, SubmitOutcome, TimerPanel,
    TimerState,
};
pub use survey::{QuestionElement, SurveyDefinition, SurveyElement, SurveyPage};
pub use workflow::{BankReport, QuizLoopService};
