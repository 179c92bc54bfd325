//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by the sampler, quiz sessions and the quiz workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    EmptyBank,
    #[error("quiz already started")]
    AlreadyStarted,
    #[error("quiz has not been started")]
    NotStarted,
    #[error("quiz already completed")]
    AlreadyCompleted,
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("no page at index {0}")]
    NoSuchPage(usize),
    #[error("navigation is disabled")]
    NavigationDisabled,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
