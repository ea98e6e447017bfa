// src/utils/time.rs

//! Calendar helpers.

use chrono::{Datelike, Local, Weekday};

/// True for Monday through Friday.
pub fn is_weekday(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Whether today (local time) is a weekday.
///
/// arXiv does not announce new papers on weekends, so scheduled runs skip
/// those days by default.
pub fn today_is_weekday() -> bool {
    is_weekday(Local::now().weekday())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekdays() {
        assert!(is_weekday(Weekday::Mon));
        assert!(is_weekday(Weekday::Tue));
        assert!(is_weekday(Weekday::Wed));
        assert!(is_weekday(Weekday::Thu));
        assert!(is_weekday(Weekday::Fri));
    }

    #[test]
    fn test_weekend() {
        assert!(!is_weekday(Weekday::Sat));
        assert!(!is_weekday(Weekday::Sun));
    }
}
