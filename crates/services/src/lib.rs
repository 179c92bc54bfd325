#![forbid(unsafe_code)]

pub mod error;
pub mod sampler;
pub mod sessions;
pub mod settings;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::QuizError;
pub use sampler::QuizSampler;
pub use settings::QuizSettings;

pub use sessions::{
    AnswerChange, BankReport, Completion, CompletionReason, DisplayConfig, MarkerColor, Page,
    PageLayout, ProgressBar, QuizLoopService, QuizProgress, QuizSession, ReviewRenderer,
    SessionEvent, SessionHooks, SessionMode, SubmitOutcome, SurveyDefinition, TextMarkup,
    TextRenderRequest, TimerPanel, TimerState,
};
