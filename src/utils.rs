//! Date helpers shared by the entity, the store and the reports

use chrono::{Local, NaiveDate};

/// The format dates are entered and stored in (e.g. `2026-06-01`)
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The format dates are displayed in (e.g. `01-06-2026`)
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parses a date in the `yyyy-MM-dd` input format.
/// Returns `None` for anything else, including calendar-invalid dates
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, INPUT_DATE_FORMAT).ok()
}

/// Formats a date in the `dd-MM-yyyy` display format
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// The current date, in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_dates() {
        assert_eq!(
            parse_date("2026-06-01"),
            Some(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("01-06-2026"), None);
        assert_eq!(parse_date("not a date"), None);
        // 2026 is not a leap year
        assert_eq!(parse_date("2026-02-29"), None);
    }

    #[test]
    fn displays_dates_day_first() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(display_date(date), "01-06-2026");
    }
}
