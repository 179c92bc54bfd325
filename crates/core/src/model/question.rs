use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── BANK RECORD ───────────────────────────────────────────────────────────────
//

/// Raw question as it appears in the bank asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub choices: Vec<String>,
    pub correct_answers: Vec<String>,
}

impl QuestionRecord {
    /// Multi-select when more than one distinct answer is correct.
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        let distinct: HashSet<&str> = self.correct_answers.iter().map(String::as_str).collect();
        if distinct.len() > 1 {
            QuestionKind::MultiSelect
        } else {
            QuestionKind::SingleSelect
        }
    }

    /// Check the record on its own (duplicate ids are a bank-level concern).
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionRecordError` found.
    pub fn validate(&self) -> Result<(), QuestionRecordError> {
        let id = self.id;
        if self.title.trim().is_empty() {
            return Err(QuestionRecordError::EmptyTitle { id });
        }
        if self.choices.is_empty() {
            return Err(QuestionRecordError::NoChoices { id });
        }
        if self.correct_answers.is_empty() {
            return Err(QuestionRecordError::NoCorrectAnswers { id });
        }
        if let Some(answer) = self
            .correct_answers
            .iter()
            .find(|answer| !self.choices.contains(answer))
        {
            return Err(QuestionRecordError::AnswerNotInChoices {
                id,
                answer: answer.clone(),
            });
        }
        Ok(())
    }
}

/// Split a bank into usable records and the reasons the others were rejected.
///
/// Records keep their bank order. A record repeating an id seen earlier is rejected.
#[must_use]
pub fn validate_bank(
    records: Vec<QuestionRecord>,
) -> (Vec<QuestionRecord>, Vec<QuestionRecordError>) {
    let mut seen = HashSet::new();
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        if let Err(err) = record.validate() {
            rejected.push(err);
            continue;
        }
        if !seen.insert(record.id) {
            rejected.push(QuestionRecordError::DuplicateId { id: record.id });
            continue;
        }
        valid.push(record);
    }

    (valid, rejected)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionRecordError {
    #[error("question {id}: title is empty")]
    EmptyTitle { id: QuestionId },

    #[error("question {id}: no choices")]
    NoChoices { id: QuestionId },

    #[error("question {id}: no correct answers")]
    NoCorrectAnswers { id: QuestionId },

    #[error("question {id}: correct answer {answer:?} is not one of the choices")]
    AnswerNotInChoices { id: QuestionId, answer: String },

    #[error("question {id}: duplicate id in bank")]
    DuplicateId { id: QuestionId },
}

//
// ─── QUIZ QUESTION ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    SingleSelect,
    MultiSelect,
}

impl QuestionKind {
    /// Element type name understood by survey renderers.
    #[must_use]
    pub fn element_type(self) -> &'static str {
        match self {
            QuestionKind::SingleSelect => "radiogroup",
            QuestionKind::MultiSelect => "checkbox",
        }
    }
}

/// Declared correct answer: one string for single-select, a set for multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// Build from the bank's answer list, dropping duplicates but keeping order.
    #[must_use]
    pub fn from_answers(answers: &[String]) -> Option<Self> {
        let mut unique: Vec<String> = Vec::with_capacity(answers.len());
        for answer in answers {
            if !unique.contains(answer) {
                unique.push(answer.clone());
            }
        }
        match unique.len() {
            0 => None,
            1 => unique.pop().map(CorrectAnswer::Single),
            _ => Some(CorrectAnswer::Multiple(unique)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CorrectAnswer::Single(value) => value.is_empty(),
            CorrectAnswer::Multiple(values) => values.is_empty(),
        }
    }

    /// Exact membership test, no case folding.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        match self {
            CorrectAnswer::Single(value) => value == text,
            CorrectAnswer::Multiple(values) => values.iter().any(|value| value == text),
        }
    }

    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            CorrectAnswer::Single(value) => vec![value.as_str()],
            CorrectAnswer::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// A sampled question as presented in one quiz session.
///
/// Everything is fixed at creation except the displayed title, which review
/// annotation rewrites from the remembered original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    id: String,
    record_id: QuestionId,
    title: String,
    category: String,
    kind: QuestionKind,
    choice_order: Vec<String>,
    correct_answer: Option<CorrectAnswer>,
    original_title: Option<String>,
}

impl QuizQuestion {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn record_id(&self) -> QuestionId {
        self.record_id
    }

    /// Title as currently displayed (annotated once review has run).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn choice_order(&self) -> &[String] {
        &self.choice_order
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&CorrectAnswer> {
        self.correct_answer.as_ref()
    }

    /// The pre-annotation title, if annotation has captured it.
    #[must_use]
    pub fn captured_title(&self) -> Option<&str> {
        self.original_title.as_deref()
    }

    /// Capture the current title the first time this is called and return the
    /// captured value on every call.
    pub fn remember_original_title(&mut self) -> &str {
        self.original_title.get_or_insert_with(|| self.title.clone())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl From<QuestionRecord> for QuizQuestion {
    /// Choices are taken in the record's current order; shuffle before converting.
    fn from(record: QuestionRecord) -> Self {
        let correct_answer = CorrectAnswer::from_answers(&record.correct_answers);
        let kind = match correct_answer {
            Some(CorrectAnswer::Multiple(_)) => QuestionKind::MultiSelect,
            _ => QuestionKind::SingleSelect,
        };
        Self {
            id: record.id.to_string(),
            record_id: record.id,
            title: record.title,
            category: record.category,
            kind,
            choice_order: record.choices,
            correct_answer,
            original_title: None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, choices: &[&str], correct: &[&str]) -> QuestionRecord {
        QuestionRecord {
            id: QuestionId::new(id),
            title: format!("Question {id}"),
            category: "History".into(),
            choices: choices.iter().map(|c| (*c).to_string()).collect(),
            correct_answers: correct.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[test]
    fn single_correct_answer_is_single_select() {
        let question = QuizQuestion::from(record(1, &["A", "B"], &["A"]));
        assert_eq!(question.kind(), QuestionKind::SingleSelect);
        assert_eq!(
            question.correct_answer(),
            Some(&CorrectAnswer::Single("A".into()))
        );
        assert_eq!(question.id(), "1");
    }

    #[test]
    fn several_correct_answers_are_multi_select() {
        let question = QuizQuestion::from(record(2, &["A", "B", "C"], &["A", "C"]));
        assert_eq!(question.kind(), QuestionKind::MultiSelect);
        assert_eq!(
            question.correct_answer(),
            Some(&CorrectAnswer::Multiple(vec!["A".into(), "C".into()]))
        );
    }

    #[test]
    fn repeated_answer_counts_once() {
        let record = record(7, &["A", "B"], &["A", "A"]);
        assert_eq!(record.kind(), QuestionKind::SingleSelect);
        assert_eq!(record.validate(), Ok(()));

        let question = QuizQuestion::from(record);
        assert_eq!(question.kind(), QuestionKind::SingleSelect);
        assert_eq!(
            question.correct_answer(),
            Some(&CorrectAnswer::Single("A".into()))
        );
    }

    #[test]
    fn deserializes_camel_case_bank_json() {
        let json = r#"[{
            "id": 3,
            "title": "Who?",
            "category": "People",
            "choices": ["X", "Y"],
            "correctAnswers": ["Y"]
        }]"#;
        let records: Vec<QuestionRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].id, QuestionId::new(3));
        assert_eq!(records[0].correct_answers, vec!["Y".to_string()]);
    }

    #[test]
    fn answer_outside_choices_is_rejected() {
        let err = record(4, &["A", "B"], &["Z"]).validate().unwrap_err();
        assert_eq!(
            err,
            QuestionRecordError::AnswerNotInChoices {
                id: QuestionId::new(4),
                answer: "Z".into()
            }
        );
    }

    #[test]
    fn empty_answers_are_rejected() {
        let err = record(5, &["A"], &[]).validate().unwrap_err();
        assert!(matches!(err, QuestionRecordError::NoCorrectAnswers { .. }));
    }

    #[test]
    fn validate_bank_drops_malformed_and_duplicate_records() {
        let bank = vec![
            record(1, &["A", "B"], &["A"]),
            record(2, &["A", "B"], &["C"]),
            record(1, &["A", "B"], &["B"]),
            record(3, &["A", "B"], &["A", "B"]),
        ];
        let (valid, rejected) = validate_bank(bank);
        let ids: Vec<u64> = valid.iter().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(rejected.len(), 2);
        assert!(matches!(
            rejected[1],
            QuestionRecordError::DuplicateId { .. }
        ));
    }

    #[test]
    fn original_title_is_captured_once() {
        let mut question = QuizQuestion::from(record(6, &["A"], &["A"]));
        assert_eq!(question.captured_title(), None);
        assert_eq!(question.remember_original_title(), "Question 6");
        question.set_title("Question 6 Correct");
        assert_eq!(question.remember_original_title(), "Question 6");
        assert_eq!(question.title(), "Question 6 Correct");
    }

    #[test]
    fn correct_answer_membership_is_exact() {
        let answer = CorrectAnswer::Multiple(vec!["Alpha".into(), "Beta".into()]);
        assert!(answer.contains("Beta"));
        assert!(!answer.contains("beta"));
        assert!(CorrectAnswer::Single(String::new()).is_empty());
    }
}
