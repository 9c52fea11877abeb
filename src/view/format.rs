//! Display formatting
//!
//! Clock, date and count formatting for the dashboard. Output follows en-US
//! conventions: `10:00 AM`, `1/15/2024`, `12,345`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Naive layouts the backend has been seen to emit
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// A parsed backend timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    /// Carries an offset; converted to the viewer's zone for display
    Zoned(DateTime<FixedOffset>),
    /// Backend wall-clock time; displayed as-is
    Naive(NaiveDateTime),
}

impl Stamp {
    /// Wall-clock time in `tz`
    pub fn local_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDateTime {
        match self {
            Stamp::Zoned(dt) => dt.with_timezone(tz).naive_local(),
            Stamp::Naive(naive) => *naive,
        }
    }
}

/// Parse an RFC 3339 or naive backend timestamp
pub fn parse_stamp(raw: &str) -> Option<Stamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Stamp::Zoned(dt));
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(Stamp::Naive)
}

/// Two-digit hour and minute: `09:05 AM`
pub fn clock(time: &NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Numeric date: `1/15/2024`
pub fn date(time: &NaiveDateTime) -> String {
    time.format("%-m/%-d/%Y").to_string()
}

/// Clock label for a raw backend timestamp, or the raw text if unparsable
pub fn clock_label<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    match parse_stamp(raw) {
        Some(stamp) => clock(&stamp.local_in(tz)),
        None => raw.to_string(),
    }
}

/// Date label for a raw backend timestamp, or the raw text if unparsable
pub fn date_label<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    match parse_stamp(raw) {
        Some(stamp) => date(&stamp.local_in(tz)),
        None => raw.to_string(),
    }
}

/// Count with thousands separators: `1234567` -> `1,234,567`
pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_clock_label_rfc3339() {
        assert_eq!(clock_label("2024-01-01T10:00:00Z", &Utc), "10:00 AM");
        assert_eq!(clock_label("2024-01-01T21:07:00Z", &Utc), "09:07 PM");
    }

    #[test]
    fn test_clock_label_converts_offsets() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(clock_label("2024-01-01T10:00:00Z", &tz), "12:00 PM");
    }

    #[test]
    fn test_naive_stamp_displayed_as_is() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(clock_label("2024-03-09 14:30:00", &tz), "02:30 PM");
        assert_eq!(date_label("2024-03-09 14:30:00", &tz), "3/9/2024");
    }

    #[test]
    fn test_unparsable_passthrough() {
        assert_eq!(clock_label("", &Utc), "");
        assert_eq!(date_label("yesterday-ish", &Utc), "yesterday-ish");
    }

    #[test]
    fn test_clock_midnight() {
        let time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 15, 0)
            .unwrap();
        assert_eq!(clock(&time), "12:15 AM");
    }

    #[test]
    fn test_count_separators() {
        assert_eq!(count(0), "0");
        assert_eq!(count(120), "120");
        assert_eq!(count(1000), "1,000");
        assert_eq!(count(12345), "12,345");
        assert_eq!(count(1234567), "1,234,567");
    }
}
