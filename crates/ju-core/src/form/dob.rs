//! Date-of-birth helpers for the segmented (year / month / day) widget.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern"));

/// Raw segment values of the date widget. Each part may be empty while the
/// user is still typing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DobParts {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DobParts {
    pub fn new(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    /// Split a stored `YYYY-MM-DD` value. Anything else yields `None`.
    pub fn from_iso(iso: &str) -> Option<Self> {
        if !ISO_DATE.is_match(iso) {
            return None;
        }
        let mut parts = iso.split('-');
        Some(Self::new(parts.next()?, parts.next()?, parts.next()?))
    }

    /// Compose the ISO date once every part is present.
    ///
    /// The day is clamped to the length of the selected month, so picking
    /// 31 and then switching to February yields the last day of February.
    pub fn compose(&self) -> Option<String> {
        let year: i32 = self.year.trim().parse().ok()?;
        let month: u32 = self.month.trim().parse().ok()?;
        let day: u32 = self.day.trim().parse().ok()?;
        if !(1..=12).contains(&month) || day == 0 || !(1..=9999).contains(&year) {
            return None;
        }
        let day = day.min(days_in_month(year, month));
        Some(format!("{year:04}-{month:02}-{day:02}"))
    }
}

/// Number of days in `month` (1..=12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Render a stored ISO date as `DD Mon YYYY` for the summary screen.
/// Empty or unparseable input renders as an empty string.
pub fn format_nice_date(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_default()
}
