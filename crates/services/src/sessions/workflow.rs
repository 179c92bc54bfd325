use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

use quiz_core::model::QuestionRecordError;
use storage::repository::{QuestionBankRepository, load_validated};

use super::session::QuizSession;
use crate::Clock;
use crate::error::QuizError;
use crate::sampler::QuizSampler;
use crate::settings::QuizSettings;

/// Outcome of validating the bank without starting a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankReport {
    pub usable: usize,
    pub rejected: Vec<QuestionRecordError>,
}

/// Orchestrates bank loading, sampling and session construction.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<dyn QuestionBankRepository>,
    settings: QuizSettings,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<dyn QuestionBankRepository>, settings: QuizSettings) -> Self {
        Self {
            clock,
            bank,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Load the bank and build a fresh quiz session sitting on its intro page.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` when the fetch fails and
    /// `QuizError::EmptyBank` when no usable record remains. No session is
    /// created in either case.
    pub async fn start_quiz(&self) -> Result<QuizSession, QuizError> {
        let bank = load_validated(self.bank.as_ref()).await?;
        let questions =
            QuizSampler::new(&bank.records).sample(self.settings.sample_size, &mut rand::rng())?;
        self.build_session(questions)
    }

    /// Same as `start_quiz` with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// See `start_quiz`.
    pub async fn start_quiz_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<QuizSession, QuizError> {
        let bank = load_validated(self.bank.as_ref()).await?;
        let questions = QuizSampler::new(&bank.records).sample(self.settings.sample_size, rng)?;
        self.build_session(questions)
    }

    /// Fetch and validate the bank only.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` when the fetch fails.
    pub async fn inspect_bank(&self) -> Result<BankReport, QuizError> {
        let bank = load_validated(self.bank.as_ref()).await?;
        Ok(BankReport {
            usable: bank.records.len(),
            rejected: bank.rejected,
        })
    }

    fn build_session(
        &self,
        questions: Vec<quiz_core::model::QuizQuestion>,
    ) -> Result<QuizSession, QuizError> {
        debug!(sampled = questions.len(), "questions sampled");
        let session = QuizSession::new(questions, self.settings.clone(), self.clock)?;
        info!(session = %session.id(), "quiz session ready");
        Ok(session)
    }
}
