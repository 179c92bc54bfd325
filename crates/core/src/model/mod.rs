mod ids;
mod question;
mod response;
mod summary;

pub use ids::{QuestionId, SessionId};
pub use question::{
    CorrectAnswer, QuestionKind, QuestionRecord, QuestionRecordError, QuizQuestion,
    validate_bank,
};
pub use response::ResponseValue;
pub use summary::QuizSummary;
