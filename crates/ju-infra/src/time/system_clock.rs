use chrono::{Local, NaiveDate};
use ju_core::ports::ClockPort;

/// Today's date in the local time zone.
pub struct LocalClock;

impl ClockPort for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_matches_local_calendar_date() {
        let before = Local::now().date_naive();
        let today = LocalClock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
