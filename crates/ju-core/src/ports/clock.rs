use chrono::NaiveDate;

/// Source of "today" for the age rule.
pub trait ClockPort: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single date. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl ClockPort for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
