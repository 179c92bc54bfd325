/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    /// One-based number of the question on screen, `None` on the intro page or in review.
    pub current_question: Option<usize>,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Share of answered questions in whole percent.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.answered * 100 / self.total
    }
}
