use serde::{Deserialize, Serialize};

use crate::grading::Verdict;

/// Score of a finished quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
}

impl QuizSummary {
    #[must_use]
    pub fn from_verdicts(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        let mut summary = Self::default();
        for verdict in verdicts {
            summary.total = summary.total.saturating_add(1);
            match verdict {
                Verdict::Correct => summary.correct = summary.correct.saturating_add(1),
                Verdict::Incorrect => summary.incorrect = summary.incorrect.saturating_add(1),
                Verdict::Indeterminate => {
                    summary.unanswered = summary.unanswered.saturating_add(1);
                }
            }
        }
        summary
    }

    /// Whole-number percentage of correct answers; zero for an empty quiz.
    #[must_use]
    pub fn percent_correct(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.correct.saturating_mul(100) / self.total
    }
}
