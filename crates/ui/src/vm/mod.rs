mod markdown_vm;
mod quiz_vm;

pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{ChoiceVm, QuestionVm, QuizIntent, QuizScreen, QuizVm, start_quiz};
