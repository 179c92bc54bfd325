use std::env;

use quiz_core::MultiSelectPolicy;
use quiz_core::time::format_countdown;

/// Quiz tunables. Defaults reproduce the 90 minute American history quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    pub title: String,
    pub sample_size: usize,
    /// Whole-quiz budget; zero disables the timer.
    pub time_limit_secs: u64,
    pub start_label: String,
    pub multi_select_policy: MultiSelectPolicy,
    intro_html: Option<String>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            title: "American History Quiz".into(),
            sample_size: 10,
            time_limit_secs: 5400,
            start_label: "Start Quiz".into(),
            multi_select_policy: MultiSelectPolicy::AcceptSuperset,
            intro_html: None,
        }
    }
}

impl QuizSettings {
    /// Defaults overridden by `QUIZ_TITLE`, `QUIZ_SAMPLE_SIZE`,
    /// `QUIZ_TIME_LIMIT_SECS` and `QUIZ_STRICT_MULTI`. Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    /// A sample size of zero is ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(title) = lookup("QUIZ_TITLE").filter(|t| !t.trim().is_empty()) {
            settings.title = title;
        }
        if let Some(size) = lookup("QUIZ_SAMPLE_SIZE")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
        {
            settings.sample_size = size;
        }
        if let Some(secs) =
            lookup("QUIZ_TIME_LIMIT_SECS").and_then(|value| value.trim().parse::<u64>().ok())
        {
            settings.time_limit_secs = secs;
        }
        if lookup("QUIZ_STRICT_MULTI")
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"))
        {
            settings.multi_select_policy = MultiSelectPolicy::ExactMatch;
        }
        settings
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    #[must_use]
    pub fn with_multi_select_policy(mut self, policy: MultiSelectPolicy) -> Self {
        self.multi_select_policy = policy;
        self
    }

    #[must_use]
    pub fn with_intro_html(mut self, html: impl Into<String>) -> Self {
        self.intro_html = Some(html.into());
        self
    }

    /// Intro page copy; derived from the time limit unless overridden.
    #[must_use]
    pub fn intro_html(&self) -> String {
        if let Some(html) = &self.intro_html {
            return html.clone();
        }
        let budget = match self.time_limit_secs {
            0 => "There is no time limit.".to_string(),
            secs if secs % 60 == 0 => format!("You will have {} minutes to end the quiz.", secs / 60),
            secs => format!("You will have {} to end the quiz.", format_countdown(secs)),
        };
        format!(
            "You are about to start a quiz on American history. <br>{budget}<br>Click <b>{}</b> to begin.",
            self.start_label
        )
    }
}
