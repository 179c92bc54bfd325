//! Read-only review: verdict annotation of titles and markup of rendered text.

use quiz_core::grading::{CORRECT_LABEL, INCORRECT_LABEL};
use quiz_core::model::{QuizQuestion, ResponseValue};
use quiz_core::{MultiSelectPolicy, Verdict, evaluate};

use super::markup::{MarkerColor, TextMarkup, TextRenderRequest};

/// Annotates questions once a session has moved into review mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReviewRenderer {
    policy: MultiSelectPolicy,
}

impl ReviewRenderer {
    #[must_use]
    pub fn new(policy: MultiSelectPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn grade(&self, question: &QuizQuestion, response: Option<&ResponseValue>) -> Verdict {
        evaluate(question.correct_answer(), response, self.policy)
    }

    /// Rewrite the displayed title as `original + " Correct" | " Incorrect"`.
    ///
    /// The original title is captured on the first pass only, so re-running never
    /// stacks suffixes. Indeterminate questions show the bare original title.
    pub fn annotate(&self, question: &mut QuizQuestion, response: Option<&ResponseValue>) -> Verdict {
        let verdict = self.grade(question, response);
        let original = question.remember_original_title().to_string();
        let title = match verdict.label() {
            Some(label) => format!("{original} {label}"),
            None => original,
        };
        question.set_title(title);
        verdict
    }

    /// Markup for a piece of text rendered during review.
    ///
    /// Verdict words are coloured first; a text that exactly equals a correct
    /// answer is then emphasized, replacing any colouring. With a question id
    /// only that question's answers are considered, otherwise every question's.
    #[must_use]
    pub fn markup<'q>(
        &self,
        request: &TextRenderRequest<'_>,
        questions: impl IntoIterator<Item = &'q QuizQuestion>,
    ) -> TextMarkup {
        let mut markup =
            colorize_verdict(request.text).unwrap_or_else(|| TextMarkup::plain(request.text));

        let is_correct_choice = questions
            .into_iter()
            .filter(|q| request.question_id.is_none_or(|id| q.id() == id))
            .filter_map(QuizQuestion::correct_answer)
            .any(|answer| answer.contains(request.text));
        if is_correct_choice {
            markup = TextMarkup::Emphasized(request.text.to_string());
        }

        markup
    }
}

/// Split `text` at the first `Correct`, or failing that the first `Incorrect`,
/// and colour that word.
#[must_use]
pub fn colorize_verdict(text: &str) -> Option<TextMarkup> {
    split_marker(text, CORRECT_LABEL, MarkerColor::Green)
        .or_else(|| split_marker(text, INCORRECT_LABEL, MarkerColor::Red))
}

fn split_marker(text: &str, marker: &str, color: MarkerColor) -> Option<TextMarkup> {
    let start = text.find(marker)?;
    let end = start + marker.len();
    Some(TextMarkup::Marked {
        prefix: text[..start].to_string(),
        marker: marker.to_string(),
        color,
        rest: text[end..].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, QuestionRecord};

    fn question(id: u64, correct: &[&str]) -> QuizQuestion {
        QuizQuestion::from(QuestionRecord {
            id: QuestionId::new(id),
            title: format!("Question {id}"),
            category: "General".into(),
            choices: vec!["A".into(), "B".into(), "C".into()],
            correct_answers: correct.iter().map(|c| (*c).to_string()).collect(),
        })
    }

    #[test]
    fn annotation_appends_verdict_once() {
        let renderer = ReviewRenderer::default();
        let mut q = question(1, &["A"]);
        let answer = ResponseValue::from("A");

        assert_eq!(renderer.annotate(&mut q, Some(&answer)), Verdict::Correct);
        let first = q.title().to_string();
        renderer.annotate(&mut q, Some(&answer));
        assert_eq!(q.title(), first);
        assert_eq!(q.title(), "Question 1 Correct");
    }

    #[test]
    fn reannotation_replaces_previous_verdict() {
        let renderer = ReviewRenderer::default();
        let mut q = question(1, &["A"]);
        renderer.annotate(&mut q, Some(&"B".into()));
        assert_eq!(q.title(), "Question 1 Incorrect");
        renderer.annotate(&mut q, Some(&"A".into()));
        assert_eq!(q.title(), "Question 1 Correct");
    }

    #[test]
    fn unanswered_question_keeps_plain_title() {
        let renderer = ReviewRenderer::default();
        let mut q = question(2, &["A", "B"]);
        assert_eq!(renderer.annotate(&mut q, None), Verdict::Indeterminate);
        assert_eq!(q.title(), "Question 2");
        assert_eq!(q.captured_title(), Some("Question 2"));
    }

    #[test]
    fn verdict_words_are_coloured() {
        assert_eq!(
            colorize_verdict("Question 1 Correct"),
            Some(TextMarkup::Marked {
                prefix: "Question 1 ".into(),
                marker: "Correct".into(),
                color: MarkerColor::Green,
                rest: String::new(),
            })
        );
        assert_eq!(
            colorize_verdict("Question 1 Incorrect"),
            Some(TextMarkup::Marked {
                prefix: "Question 1 ".into(),
                marker: "Incorrect".into(),
                color: MarkerColor::Red,
                rest: String::new(),
            })
        );
        assert_eq!(colorize_verdict("Question 1"), None);
    }

    #[test]
    fn correct_is_checked_before_incorrect() {
        let markup = colorize_verdict("Incorrect or Correct").unwrap();
        assert!(matches!(
            markup,
            TextMarkup::Marked {
                color: MarkerColor::Green,
                ..
            }
        ));
        assert_eq!(markup.text(), "Incorrect or Correct");
    }

    #[test]
    fn correct_choices_are_emphasized_for_single_and_multi() {
        let renderer = ReviewRenderer::default();
        let questions = vec![question(1, &["A"]), question(2, &["B", "C"])];

        let single = renderer.markup(&TextRenderRequest::new("A"), &questions);
        assert_eq!(single, TextMarkup::Emphasized("A".into()));

        let multi = renderer.markup(&TextRenderRequest::for_question("2", "C"), &questions);
        assert_eq!(multi, TextMarkup::Emphasized("C".into()));

        let scoped = renderer.markup(&TextRenderRequest::for_question("2", "A"), &questions);
        assert_eq!(scoped, TextMarkup::plain("A"));
    }

    #[test]
    fn emphasis_overrides_colour() {
        let renderer = ReviewRenderer::default();
        let q = QuizQuestion::from(QuestionRecord {
            id: QuestionId::new(3),
            title: "Pick the right word".into(),
            category: String::new(),
            choices: vec!["Correct".into(), "Wrong".into()],
            correct_answers: vec!["Correct".into()],
        });
        let markup = renderer.markup(&TextRenderRequest::new("Correct"), [&q]);
        assert_eq!(markup, TextMarkup::Emphasized("Correct".into()));
    }
}
