//! Relative due-date keywords in free-text task input.
//!
//! # Invariants
//! - At most one keyword resolves per input; `today` wins over `tomorrow`.
//! - Detection is a case-insensitive substring test, stripping is whole-word.
//!   `"todays list"` therefore resolves today but keeps its text.
//! - Input without a keyword passes through byte-for-byte.

use crate::clock::Clock;
use chrono::{DateTime, Days, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static TODAY_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btoday\b").expect("static regex must compile"));
static TOMORROW_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btomorrow\b").expect("static regex must compile"));

/// Result of scanning one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateIntent {
    /// Input with the resolved keyword removed and trimmed.
    pub clean_text: String,
    /// Local start-of-day of the resolved date.
    pub due_date: Option<DateTime<Utc>>,
}

impl DateIntent {
    /// Label to store: `clean_text`, or the trimmed `original` when stripping
    /// left nothing (input `"today"` keeps the label `"today"`).
    pub fn display_text(&self, original: &str) -> String {
        if self.clean_text.is_empty() {
            original.trim().to_string()
        } else {
            self.clean_text.clone()
        }
    }
}

/// Splits a `today`/`tomorrow` intent out of `input`.
pub fn parse_date_intent(input: &str, clock: &dyn Clock) -> DateIntent {
    let lowered = input.to_lowercase();

    let (keyword, days_ahead) = if lowered.contains("today") {
        (&*TODAY_WORD, 0)
    } else if lowered.contains("tomorrow") {
        (&*TOMORROW_WORD, 1)
    } else {
        return DateIntent {
            clean_text: input.to_string(),
            due_date: None,
        };
    };

    let today = clock.today();
    let day = today.checked_add_days(Days::new(days_ahead)).unwrap_or(today);

    DateIntent {
        clean_text: keyword.replace_all(input, "").trim().to_string(),
        due_date: Some(clock.start_of_day(day)),
    }
}
