//! Built-in American history bank used by the `seed` tool and tests.

use quiz_core::model::{QuestionId, QuestionRecord};

fn record(id: u64, title: &str, category: &str, choices: &[&str], correct: &[&str]) -> QuestionRecord {
    QuestionRecord {
        id: QuestionId::new(id),
        title: title.to_string(),
        category: category.to_string(),
        choices: choices.iter().map(|c| (*c).to_string()).collect(),
        correct_answers: correct.iter().map(|c| (*c).to_string()).collect(),
    }
}

#[must_use]
pub fn sample_bank() -> Vec<QuestionRecord> {
    vec![
        record(
            1,
            "When was the American Civil War?",
            "Wars",
            &["1796-1803", "1810-1814", "1861-1865", "1939-1945"],
            &["1861-1865"],
        ),
        record(
            2,
            "Whose quote is this: \"Give me liberty, or give me death\"?",
            "People",
            &["John Hancock", "James Madison", "Patrick Henry", "Samuel Adams"],
            &["Patrick Henry"],
        ),
        record(
            3,
            "What is Magna Carta?",
            "Documents",
            &[
                "The foundation of the British parliamentary system",
                "The Great Seal of the monarchs of England",
                "The French Declaration of the Rights of Man",
                "The charter signed by the Pilgrims on the Mayflower",
            ],
            &["The foundation of the British parliamentary system"],
        ),
        record(
            4,
            "Which of these men signed the Declaration of Independence?",
            "People",
            &["Benjamin Franklin", "George Washington", "John Adams", "Thomas Jefferson"],
            &["Benjamin Franklin", "John Adams", "Thomas Jefferson"],
        ),
        record(
            5,
            "In which year did the Constitution take effect?",
            "Documents",
            &["1776", "1781", "1789", "1791"],
            &["1789"],
        ),
        record(
            6,
            "Which states were among the original thirteen colonies?",
            "Geography",
            &["Georgia", "Maine", "Vermont", "Virginia"],
            &["Georgia", "Virginia"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::validate_bank;

    #[test]
    fn sample_bank_is_well_formed() {
        let bank = sample_bank();
        let total = bank.len();
        let (valid, rejected) = validate_bank(bank);
        assert!(rejected.is_empty(), "{rejected:?}");
        assert_eq!(valid.len(), total);
    }
}
