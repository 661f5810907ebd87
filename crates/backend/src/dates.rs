//! Parsing for the fixed-format date and time text the form produces.
//!
//! All call sites go through these two functions so malformed text is
//! handled identically everywhere: the adapter drops rows that fail to
//! parse, and the view model never sees them.

use chrono::{NaiveDate, NaiveTime};

/// Parse an event date in `DD/MM/YYYY` form.
pub fn parse_event_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok()
}

/// Parse a start time in 24-hour `HH:MM` form.
pub fn parse_start_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_date() {
        assert_eq!(
            parse_event_date("15/10/2024"),
            NaiveDate::from_ymd_opt(2024, 10, 15)
        );
        assert_eq!(
            parse_event_date(" 1/2/2025 "),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(parse_event_date("2024-10-15"), None);
        assert_eq!(parse_event_date("31/02/2024"), None);
        assert_eq!(parse_event_date(""), None);
    }

    #[test]
    fn test_parse_start_time() {
        assert_eq!(
            parse_start_time("09:30"),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
        assert_eq!(
            parse_start_time("23:59"),
            NaiveTime::from_hms_opt(23, 59, 0)
        );
        assert_eq!(parse_start_time("9:30 PM"), None);
        assert_eq!(parse_start_time("25:00"), None);
        assert_eq!(parse_start_time(""), None);
    }

    #[test]
    fn test_dates_order_by_year_month_day() {
        let a = parse_event_date("31/12/2024").unwrap();
        let b = parse_event_date("01/01/2025").unwrap();
        let c = parse_event_date("02/01/2025").unwrap();
        assert!(a < b && b < c);
    }
}
