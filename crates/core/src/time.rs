use chrono::{DateTime, Duration, Utc};

/// Source of "now" for session timestamps. Tests use a fixed instant.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Whole seconds elapsed since `start`, clamped at zero.
    #[must_use]
    pub fn seconds_since(&self, start: DateTime<Utc>) -> u64 {
        u64::try_from((self.now() - start).num_seconds()).unwrap_or(0)
    }
}

/// Format a second count as `h:mm:ss`, or `m:ss` under an hour.
#[must_use]
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_and_measures() {
        let start = fixed_now();
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(95));
        assert_eq!(clock.seconds_since(start), 95);
        assert_eq!(Clock::fixed(start).seconds_since(clock.now()), 0);
    }

    #[test]
    fn countdown_formats_minutes_and_hours() {
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(5400), "1:30:00");
        assert_eq!(format_countdown(0), "0:00");
    }
}
