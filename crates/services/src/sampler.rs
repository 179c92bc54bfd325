use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use quiz_core::model::{QuestionRecord, QuizQuestion};

use crate::error::QuizError;

/// Picks the questions for one quiz from the bank.
pub struct QuizSampler<'a> {
    bank: &'a [QuestionRecord],
    shuffle_choices: bool,
}

impl<'a> QuizSampler<'a> {
    #[must_use]
    pub fn new(bank: &'a [QuestionRecord]) -> Self {
        Self {
            bank,
            shuffle_choices: true,
        }
    }

    /// Keep each record's choice order instead of shuffling it.
    #[must_use]
    pub fn with_shuffle_choices(mut self, shuffle: bool) -> Self {
        self.shuffle_choices = shuffle;
        self
    }

    /// Select up to `count` records uniformly without replacement.
    ///
    /// - A bank smaller than `count` yields every record, in random order.
    /// - Records repeating an id already seen are skipped, so ids stay unique.
    /// - Each question gets its own independent choice shuffle.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` if the bank has no records.
    pub fn sample<R: Rng + ?Sized>(
        self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<QuizQuestion>, QuizError> {
        if self.bank.is_empty() {
            return Err(QuizError::EmptyBank);
        }

        let mut seen = HashSet::new();
        let mut candidates: Vec<&QuestionRecord> = self
            .bank
            .iter()
            .filter(|record| seen.insert(record.id))
            .collect();
        candidates.as_mut_slice().shuffle(rng);
        candidates.truncate(count);

        let questions = candidates
            .into_iter()
            .map(|record| {
                let mut record = record.clone();
                if self.shuffle_choices {
                    record.choices.as_mut_slice().shuffle(rng);
                }
                QuizQuestion::from(record)
            })
            .collect();

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, QuestionKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(id: u64, correct: &[&str]) -> QuestionRecord {
        QuestionRecord {
            id: QuestionId::new(id),
            title: format!("Q{id}"),
            category: "General".into(),
            choices: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answers: correct.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    fn bank(n: u64) -> Vec<QuestionRecord> {
        (1..=n).map(|id| record(id, &["A"])).collect()
    }

    #[test]
    fn empty_bank_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = QuizSampler::new(&[]).sample(3, &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::EmptyBank));
    }

    #[test]
    fn samples_requested_count_without_duplicates() {
        let bank = bank(20);
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = QuizSampler::new(&bank).sample(7, &mut rng).unwrap();
            assert_eq!(questions.len(), 7);
            let ids: HashSet<&str> = questions.iter().map(QuizQuestion::id).collect();
            assert_eq!(ids.len(), 7);
        }
    }

    #[test]
    fn small_bank_yields_everything() {
        let bank = bank(3);
        let mut rng = StdRng::seed_from_u64(9);
        let questions = QuizSampler::new(&bank).sample(10, &mut rng).unwrap();
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn repeated_ids_are_sampled_once() {
        let bank = vec![record(1, &["A"]), record(1, &["B"]), record(2, &["A"])];
        let mut rng = StdRng::seed_from_u64(3);
        let questions = QuizSampler::new(&bank).sample(5, &mut rng).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn choice_order_is_a_permutation() {
        let bank = vec![record(1, &["A", "C"])];
        let mut rng = StdRng::seed_from_u64(42);
        let questions = QuizSampler::new(&bank).sample(1, &mut rng).unwrap();
        let mut order = questions[0].choice_order().to_vec();
        order.sort();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert_eq!(questions[0].kind(), QuestionKind::MultiSelect);
    }

    #[test]
    fn shuffling_can_be_disabled() {
        let bank = bank(1);
        let mut rng = StdRng::seed_from_u64(5);
        let questions = QuizSampler::new(&bank)
            .with_shuffle_choices(false)
            .sample(1, &mut rng)
            .unwrap();
        assert_eq!(questions[0].choice_order(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn every_question_can_be_drawn() {
        let bank = bank(5);
        let mut drawn = HashSet::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let questions = QuizSampler::new(&bank).sample(1, &mut rng).unwrap();
            drawn.insert(questions[0].id().to_string());
        }
        assert_eq!(drawn.len(), 5);
    }
}
