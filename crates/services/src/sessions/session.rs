use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use quiz_core::model::{QuestionKind, QuizQuestion, QuizSummary, ResponseValue, SessionId};
use quiz_core::{Clock, Verdict, evaluate};

use super::hooks::{
    AnswerChange, Completion, CompletionReason, SessionEvent, SessionHooks, SessionMode,
};
use super::markup::{TextMarkup, TextRenderRequest};
use super::progress::QuizProgress;
use super::review::ReviewRenderer;
use super::survey::SurveyDefinition;
use crate::error::QuizError;
use crate::settings::QuizSettings;

//
// ─── PAGES & DISPLAY ───────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    /// Always the first page; carries no question.
    Intro { html: String },
    Question { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLayout {
    /// One question per page with navigation.
    Paged,
    /// Every question on one page.
    SinglePage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressBar {
    Bottom,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPanel {
    Top,
    Hidden,
}

/// How the rendering collaborator should present the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    pub mode: SessionMode,
    pub layout: PageLayout,
    pub show_navigation: bool,
    pub progress_bar: ProgressBar,
    pub timer_panel: TimerPanel,
    /// Zero means no limit.
    pub time_limit_secs: u64,
    pub page_time_limit_secs: u64,
    pub show_completed_page: bool,
    pub start_label: String,
}

impl DisplayConfig {
    fn answering(settings: &QuizSettings) -> Self {
        Self {
            mode: SessionMode::Editable,
            layout: PageLayout::Paged,
            show_navigation: true,
            progress_bar: ProgressBar::Bottom,
            timer_panel: if settings.time_limit_secs > 0 {
                TimerPanel::Top
            } else {
                TimerPanel::Hidden
            },
            time_limit_secs: settings.time_limit_secs,
            page_time_limit_secs: 0,
            show_completed_page: false,
            start_label: settings.start_label.clone(),
        }
    }

    fn review_only(&self) -> Self {
        Self {
            mode: SessionMode::ReviewOnly,
            layout: PageLayout::SinglePage,
            show_navigation: false,
            progress_bar: ProgressBar::Off,
            timer_panel: TimerPanel::Hidden,
            time_limit_secs: 0,
            page_time_limit_secs: 0,
            show_completed_page: self.show_completed_page,
            start_label: self.start_label.clone(),
        }
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.mode == SessionMode::ReviewOnly
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// No budget, quiz not started, or already finished.
    Off,
    Running { remaining_secs: u64 },
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced { page: usize },
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AnswerSlot {
    value: ResponseValue,
    modified: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run of the quiz: intro page, timed answering pages, then read-only review.
///
/// The session owns its questions and answers exclusively. Every transition is
/// reported through `SessionHooks`.
pub struct QuizSession {
    id: SessionId,
    settings: QuizSettings,
    clock: Clock,
    questions: Vec<QuizQuestion>,
    pages: Vec<Page>,
    current_page: usize,
    display: DisplayConfig,
    answers: HashMap<String, AnswerSlot>,
    elapsed_secs: u64,
    started_at: Option<DateTime<Utc>>,
    completion: Option<Completion>,
    review: Option<ReviewRenderer>,
    hooks: SessionHooks,
}

impl QuizSession {
    /// Build a session over already-sampled questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` if `questions` is empty.
    pub fn new(
        questions: Vec<QuizQuestion>,
        settings: QuizSettings,
        clock: Clock,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }

        let mut pages = Vec::with_capacity(questions.len() + 1);
        pages.push(Page::Intro {
            html: settings.intro_html(),
        });
        pages.extend((0..questions.len()).map(|index| Page::Question { index }));

        Ok(Self {
            id: SessionId::generate(),
            display: DisplayConfig::answering(&settings),
            settings,
            clock,
            questions,
            pages,
            current_page: 0,
            answers: HashMap::new(),
            elapsed_secs: 0,
            started_at: None,
            completion: None,
            review: None,
            hooks: SessionHooks::default(),
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.display.mode
    }

    #[must_use]
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn current_page_index(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_page]
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.current_page() {
            Page::Question { index } => self.questions.get(*index),
            Page::Intro { .. } => None,
        }
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 == self.pages.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id() == question_id)
    }

    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&ResponseValue> {
        self.answers.get(question_id).map(|slot| &slot.value)
    }

    /// True while an answer has been edited but the session not yet frozen.
    #[must_use]
    pub fn is_modified(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .is_some_and(|slot| slot.modified)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// The configured budget, unaffected by the review reconfiguration.
    #[must_use]
    pub fn time_limit_secs(&self) -> u64 {
        self.settings.time_limit_secs
    }

    pub fn hooks_mut(&mut self) -> &mut SessionHooks {
        &mut self.hooks
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = self
            .questions
            .iter()
            .filter(|q| self.answers.contains_key(q.id()))
            .count();
        let current_question = match (self.mode(), self.current_page()) {
            (SessionMode::Editable, Page::Question { index }) => Some(index + 1),
            _ => None,
        };
        QuizProgress {
            total: self.questions.len(),
            answered,
            remaining: self.questions.len() - answered,
            current_question,
            is_complete: self.is_complete(),
        }
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Leave the intro page and start the clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` or `QuizError::AlreadyCompleted`.
    pub fn start(&mut self) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::AlreadyCompleted);
        }
        if self.is_started() {
            return Err(QuizError::AlreadyStarted);
        }

        self.started_at = Some(self.clock.now());
        info!(session = %self.id, questions = self.questions.len(), "quiz started");
        self.hooks.emit(&SessionEvent::Started {
            session_id: self.id,
        });
        self.go_to(1);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoSuchPage` on the last page, or a lifecycle error
    /// when the session is not answering.
    pub fn next_page(&mut self) -> Result<usize, QuizError> {
        self.ensure_answering()?;
        let target = self.current_page + 1;
        self.go_to_page(target)
    }

    /// Go back one question. The intro page cannot be revisited.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSuchPage` on the first question page.
    pub fn prev_page(&mut self) -> Result<usize, QuizError> {
        self.ensure_answering()?;
        let target = self.current_page.saturating_sub(1);
        self.go_to_page(target)
    }

    /// Jump to a question page by index (1 is the first question).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSuchPage` for the intro page or out-of-range indexes.
    pub fn go_to_page(&mut self, target: usize) -> Result<usize, QuizError> {
        self.ensure_answering()?;
        if target == 0 || target >= self.pages.len() {
            return Err(QuizError::NoSuchPage(target));
        }
        self.go_to(target);
        Ok(target)
    }

    /// Advance, or complete the quiz when on the last page.
    ///
    /// # Errors
    ///
    /// Returns a lifecycle error when the session is not answering.
    pub fn submit(&mut self) -> Result<SubmitOutcome, QuizError> {
        self.ensure_answering()?;
        if self.is_last_page() {
            self.complete(CompletionReason::Submitted)?;
            return Ok(SubmitOutcome::Completed);
        }
        let page = self.next_page()?;
        Ok(SubmitOutcome::Advanced { page })
    }

    fn go_to(&mut self, to: usize) {
        let from = self.current_page;
        if from == to {
            return;
        }
        self.current_page = to;
        self.hooks.emit(&SessionEvent::PageChanged { from, to });
    }

    fn ensure_answering(&self) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::AlreadyCompleted);
        }
        if !self.display.show_navigation {
            return Err(QuizError::NavigationDisabled);
        }
        if !self.is_started() {
            return Err(QuizError::NotStarted);
        }
        Ok(())
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Record a response. An empty value clears the question.
    ///
    /// During review the change is tolerated and the question's annotation is
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownQuestion`, or `QuizError::NotStarted` while on
    /// the intro page.
    pub fn set_answer(
        &mut self,
        question_id: &str,
        value: impl Into<ResponseValue>,
    ) -> Result<(), QuizError> {
        let value = value.into();
        let value = (!value.is_empty()).then_some(value);
        self.apply_answer(question_id, value)
    }

    /// # Errors
    ///
    /// Same as `set_answer`.
    pub fn clear_answer(&mut self, question_id: &str) -> Result<(), QuizError> {
        self.apply_answer(question_id, None)
    }

    /// Select `choice`: replaces the answer of a single-select question and
    /// toggles membership for a multi-select one.
    ///
    /// # Errors
    ///
    /// Same as `set_answer`.
    pub fn toggle_choice(&mut self, question_id: &str, choice: &str) -> Result<(), QuizError> {
        let question = self
            .question(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        let value = match question.kind() {
            QuestionKind::SingleSelect => ResponseValue::from(choice),
            QuestionKind::MultiSelect => self
                .answer(question_id)
                .cloned()
                .unwrap_or(ResponseValue::Multiple(Vec::new()))
                .toggled(choice),
        };
        self.set_answer(question_id, value)
    }

    fn apply_answer(
        &mut self,
        question_id: &str,
        value: Option<ResponseValue>,
    ) -> Result<(), QuizError> {
        let index = self
            .questions
            .iter()
            .position(|q| q.id() == question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        let mode = self.mode();
        if mode == SessionMode::Editable && !self.is_started() {
            return Err(QuizError::NotStarted);
        }

        match &value {
            Some(value) => {
                self.answers.insert(
                    question_id.to_string(),
                    AnswerSlot {
                        value: value.clone(),
                        modified: mode == SessionMode::Editable,
                    },
                );
            }
            None => {
                self.answers.remove(question_id);
            }
        }

        if let Some(renderer) = self.review {
            let response = self.answers.get(question_id).map(|slot| &slot.value);
            let verdict = renderer.annotate(&mut self.questions[index], response);
            debug!(session = %self.id, question = question_id, ?verdict, "answer changed during review");
        }

        self.hooks.emit(&SessionEvent::AnswerChanged(AnswerChange {
            question_id: question_id.to_string(),
            value,
            mode,
        }));
        Ok(())
    }

    /// Current verdict for one question, graded on demand.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownQuestion` if the id is not in this session.
    pub fn verdict(&self, question_id: &str) -> Result<Verdict, QuizError> {
        let question = self
            .question(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        Ok(evaluate(
            question.correct_answer(),
            self.answer(question_id),
            self.settings.multi_select_policy,
        ))
    }

    /// Score of the answers as they stand now.
    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        QuizSummary::from_verdicts(self.questions.iter().map(|q| {
            evaluate(
                q.correct_answer(),
                self.answer(q.id()),
                self.settings.multi_select_policy,
            )
        }))
    }

    //
    // ─── TIMER ─────────────────────────────────────────────────────────────────
    //

    /// Account for `secs` of answering time. The caller completes the quiz
    /// (see `expire`) once this reports `TimerState::Expired`.
    pub fn tick(&mut self, secs: u64) -> TimerState {
        if self.timer_state() != TimerState::Off {
            self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
        }
        self.timer_state()
    }

    #[must_use]
    pub fn timer_state(&self) -> TimerState {
        let limit = self.display.time_limit_secs;
        if limit == 0 || !self.is_started() || self.is_complete() {
            return TimerState::Off;
        }
        if self.elapsed_secs >= limit {
            TimerState::Expired
        } else {
            TimerState::Running {
                remaining_secs: limit - self.elapsed_secs,
            }
        }
    }

    /// Complete because the time budget ran out.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyCompleted` if the quiz already finished.
    pub fn expire(&mut self) -> Result<Completion, QuizError> {
        self.complete(CompletionReason::TimeExpired)
    }

    //
    // ─── COMPLETION & REVIEW ───────────────────────────────────────────────────
    //

    /// Finish the quiz and switch to read-only review.
    ///
    /// Recorded answers are kept (only their modified flags are dropped), the
    /// display becomes a single read-only page without navigation, progress bar
    /// or timer, and every title is annotated with its verdict. From then on the
    /// review listeners are active: answer changes re-annotate and
    /// `render_text` applies review markup. The transition happens once.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyCompleted` on a second call.
    pub fn complete(&mut self, reason: CompletionReason) -> Result<Completion, QuizError> {
        if self.is_complete() {
            return Err(QuizError::AlreadyCompleted);
        }

        for slot in self.answers.values_mut() {
            slot.modified = false;
        }

        let from = self.display.mode;
        self.display = self.display.review_only();

        let renderer = ReviewRenderer::new(self.settings.multi_select_policy);
        let answers = &self.answers;
        let verdicts: Vec<Verdict> = self
            .questions
            .iter_mut()
            .map(|question| {
                let response = answers.get(question.id()).map(|slot| &slot.value);
                renderer.annotate(question, response)
            })
            .collect();
        self.review = Some(renderer);

        let completion = Completion {
            reason,
            completed_at: self.clock.now(),
            summary: QuizSummary::from_verdicts(verdicts),
        };
        self.completion = Some(completion.clone());

        info!(
            session = %self.id,
            ?reason,
            correct = completion.summary.correct,
            total = completion.summary.total,
            elapsed_secs = self.elapsed_secs,
            "quiz completed"
        );

        self.hooks.emit(&SessionEvent::ModeChanged {
            from,
            to: SessionMode::ReviewOnly,
        });
        self.hooks.emit(&SessionEvent::Completed(completion.clone()));
        Ok(completion)
    }

    /// Markup for text the renderer is about to display.
    ///
    /// Plain text while answering; review markup after completion. Registered
    /// text hooks run last and may replace the result.
    #[must_use]
    pub fn render_text(&self, request: &TextRenderRequest<'_>) -> TextMarkup {
        let mut markup = match self.review {
            Some(renderer) => renderer.markup(request, &self.questions),
            None => TextMarkup::plain(request.text),
        };
        self.hooks.render_text(request, &mut markup);
        markup
    }

    /// Pages and display settings in survey-definition form.
    #[must_use]
    pub fn survey_definition(&self) -> SurveyDefinition {
        let intro = match self.pages.first() {
            Some(Page::Intro { html }) => html.as_str(),
            _ => "",
        };
        SurveyDefinition::build(&self.settings.title, intro, &self.display, &self.questions)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("mode", &self.display.mode)
            .field("questions_len", &self.questions.len())
            .field("current_page", &self.current_page)
            .field("answers_len", &self.answers.len())
            .field("elapsed_secs", &self.elapsed_secs)
            .field("started_at", &self.started_at)
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
