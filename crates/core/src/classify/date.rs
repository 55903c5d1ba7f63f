use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";
/// What the backend emits for an unset timestamp.
pub const ZERO_DATE: &str = "0001-01-01T00:00:00Z";

/// Renders a timestamp as `M/D/YYYY` in UTC.
pub fn format_date(date: &str) -> String {
    if date.is_empty() || date == ZERO_DATE {
        return NOT_AVAILABLE.to_string();
    }
    match parse_timestamp(date.trim()) {
        Some(ts) => format!("{}/{}/{}", ts.month(), ts.day(), ts.year()),
        None => INVALID_DATE.to_string(),
    }
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_empty_dates_are_not_available() {
        assert_eq!(format_date(""), "N/A");
        assert_eq!(format_date("0001-01-01T00:00:00Z"), "N/A");
    }

    #[test]
    fn formats_iso_timestamps() {
        assert_eq!(format_date("2023-07-20T10:00:00Z"), "7/20/2023");
        assert_eq!(format_date("2025-01-05T23:30:00-05:00"), "1/6/2025");
        assert_eq!(format_date("2024-12-31T08:15:00.123"), "12/31/2024");
        assert_eq!(format_date("2024-02-29"), "2/29/2024");
    }

    #[test]
    fn malformed_dates_degrade_without_failing() {
        assert_eq!(format_date("yesterday"), "Invalid Date");
        assert_eq!(format_date("2024-13-40"), "Invalid Date");
    }
}
