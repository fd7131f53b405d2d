/// Utilities for date and time formatting
///
/// Provides consistent date/time handling for log tables and date inputs
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Marker of a timestamp the server already formatted for display
const PREFORMATTED_MARKER: &str = " - ";

/// Format a log timestamp as `MM/DD/YYYY - HH:MM:SS` (24-hour)
///
/// Values that already contain " - " and values that cannot be parsed are
/// returned unchanged. Timestamps carrying `Z` or an offset are converted to
/// the browser's time zone; timestamps without one are shown as written.
/// Example (UTC browser): "2024-01-15T10:30:00Z" -> "01/15/2024 - 10:30:00"
pub fn format_log_timestamp(raw: &str) -> String {
    if raw.contains(PREFORMATTED_MARKER) {
        return raw.to_string();
    }
    match parse_timestamp(raw.trim()) {
        Some(dt) => dt.format("%m/%d/%Y - %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse the yyyy-mm-dd value of an `<input type="date">`; empty means unset
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Render a date for an `<input type="date">`
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Today's date in the browser's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preformatted_timestamp_is_unchanged() {
        assert_eq!(
            format_log_timestamp("2024-01-15 10:30:00 - extra"),
            "2024-01-15 10:30:00 - extra"
        );
        assert_eq!(
            format_log_timestamp("01/15/2024 - 10:30:00"),
            "01/15/2024 - 10:30:00"
        );
    }

    #[test]
    fn test_iso_timestamps_are_reformatted() {
        assert_eq!(
            format_log_timestamp("2024-01-15T10:30:00"),
            "01/15/2024 - 10:30:00"
        );
        assert_eq!(
            format_log_timestamp("2024-12-31T23:59:59.5"),
            "12/31/2024 - 23:59:59"
        );
        assert_eq!(
            format_log_timestamp("2024-01-15 08:00:00"),
            "01/15/2024 - 08:00:00"
        );
        assert_eq!(format_log_timestamp("2024-02-29"), "02/29/2024 - 00:00:00");
    }

    #[test]
    fn test_offset_timestamps_use_local_zone() {
        for raw in ["2024-01-15T10:30:00Z", "2024-03-05T21:07:09.123+02:00"] {
            let expected = DateTime::parse_from_rfc3339(raw)
                .unwrap()
                .with_timezone(&Local)
                .format("%m/%d/%Y - %H:%M:%S")
                .to_string();
            assert_eq!(format_log_timestamp(raw), expected);
        }
    }

    #[test]
    fn test_unparseable_timestamp_is_returned_verbatim() {
        assert_eq!(format_log_timestamp("yesterday"), "yesterday");
        assert_eq!(format_log_timestamp(""), "");
        assert_eq!(format_log_timestamp("2024-13-45T99:00:00"), "2024-13-45T99:00:00");
    }

    #[test]
    fn test_date_input_round_trip() {
        let date = parse_date_input("2024-01-15");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(format_date_input(date), "2024-01-15");
        assert_eq!(parse_date_input(""), None);
        assert_eq!(format_date_input(None), "");
    }
}
