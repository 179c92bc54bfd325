//! Correctness of a response against a question's declared answer.

use serde::{Deserialize, Serialize};

use crate::model::{CorrectAnswer, ResponseValue};

/// Outcome of grading one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// No declared answer, or nothing selected yet.
    Indeterminate,
}

impl Verdict {
    /// Word appended to annotated titles; `None` when there is nothing to say.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Verdict::Correct => Some(CORRECT_LABEL),
            Verdict::Incorrect => Some(INCORRECT_LABEL),
            Verdict::Indeterminate => None,
        }
    }
}

pub const CORRECT_LABEL: &str = "Correct";
pub const INCORRECT_LABEL: &str = "Incorrect";

/// How a multi-select response is compared with the correct set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiSelectPolicy {
    /// Every correct choice must be selected; extra selections are ignored.
    #[default]
    AcceptSuperset,
    /// The selection must equal the correct set.
    ExactMatch,
}

/// Grade `response` against `correct`.
///
/// Total over all inputs and free of side effects.
#[must_use]
pub fn evaluate(
    correct: Option<&CorrectAnswer>,
    response: Option<&ResponseValue>,
    policy: MultiSelectPolicy,
) -> Verdict {
    let Some(correct) = correct.filter(|c| !c.is_empty()) else {
        return Verdict::Indeterminate;
    };
    let Some(response) = response.filter(|r| !r.is_empty()) else {
        return Verdict::Indeterminate;
    };

    let is_correct = match correct {
        CorrectAnswer::Single(expected) => response.as_single() == *expected,
        CorrectAnswer::Multiple(expected) => {
            let selected = response.items();
            let covers = expected
                .iter()
                .all(|answer| selected.contains(&answer.as_str()));
            match policy {
                MultiSelectPolicy::AcceptSuperset => covers,
                MultiSelectPolicy::ExactMatch => {
                    covers && selected.iter().all(|item| correct.contains(item))
                }
            }
        }
    };

    if is_correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(value: &str) -> CorrectAnswer {
        CorrectAnswer::Single(value.into())
    }

    fn multiple(values: &[&str]) -> CorrectAnswer {
        CorrectAnswer::Multiple(values.iter().map(|v| (*v).to_string()).collect())
    }

    fn grade(correct: &CorrectAnswer, response: &ResponseValue) -> Verdict {
        evaluate(Some(correct), Some(response), MultiSelectPolicy::default())
    }

    #[test]
    fn single_select_matches_exact_string() {
        let correct = single("Patrick Henry");
        assert_eq!(grade(&correct, &"Patrick Henry".into()), Verdict::Correct);
        assert_eq!(grade(&correct, &"John Hancock".into()), Verdict::Incorrect);
        assert_eq!(grade(&correct, &"patrick henry".into()), Verdict::Incorrect);
    }

    #[test]
    fn single_select_accepts_one_element_list() {
        let correct = single("1861-1865");
        assert_eq!(grade(&correct, &vec!["1861-1865"].into()), Verdict::Correct);
        assert_eq!(
            grade(&correct, &vec!["1861-1865", "1939-1945"].into()),
            Verdict::Incorrect
        );
    }

    #[test]
    fn unanswered_is_indeterminate_for_both_kinds() {
        let policy = MultiSelectPolicy::default();
        assert_eq!(
            evaluate(Some(&single("A")), None, policy),
            Verdict::Indeterminate
        );
        assert_eq!(
            evaluate(Some(&single("A")), Some(&"".into()), policy),
            Verdict::Indeterminate
        );
        assert_eq!(
            evaluate(
                Some(&multiple(&["A", "B"])),
                Some(&ResponseValue::Multiple(Vec::new())),
                policy
            ),
            Verdict::Indeterminate
        );
    }

    #[test]
    fn missing_correct_answer_is_indeterminate() {
        let policy = MultiSelectPolicy::default();
        assert_eq!(
            evaluate(None, Some(&"A".into()), policy),
            Verdict::Indeterminate
        );
        assert_eq!(
            evaluate(Some(&multiple(&[])), Some(&"A".into()), policy),
            Verdict::Indeterminate
        );
    }

    #[test]
    fn multi_select_accepts_superset_by_default() {
        let correct = multiple(&["A", "B"]);
        assert_eq!(grade(&correct, &vec!["A", "B", "C"].into()), Verdict::Correct);
        assert_eq!(grade(&correct, &vec!["B", "A"].into()), Verdict::Correct);
    }

    #[test]
    fn multi_select_subset_is_incorrect() {
        let correct = multiple(&["A", "B"]);
        assert_eq!(grade(&correct, &vec!["A"].into()), Verdict::Incorrect);
        assert_eq!(grade(&correct, &"A".into()), Verdict::Incorrect);
    }

    #[test]
    fn exact_match_policy_rejects_extra_selections() {
        let correct = multiple(&["A", "B"]);
        let policy = MultiSelectPolicy::ExactMatch;
        assert_eq!(
            evaluate(Some(&correct), Some(&vec!["A", "B", "C"].into()), policy),
            Verdict::Incorrect
        );
        assert_eq!(
            evaluate(Some(&correct), Some(&vec!["B", "A"].into()), policy),
            Verdict::Correct
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let correct = multiple(&["A", "B"]);
        let response: ResponseValue = vec!["A", "B", "C"].into();
        let first = grade(&correct, &response);
        for _ in 0..5 {
            assert_eq!(grade(&correct, &response), first);
        }
    }

    #[test]
    fn labels_follow_verdicts() {
        assert_eq!(Verdict::Correct.label(), Some("Correct"));
        assert_eq!(Verdict::Incorrect.label(), Some("Incorrect"));
        assert_eq!(Verdict::Indeterminate.label(), None);
    }
}
