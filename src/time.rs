//! Calendar handling in the fixed reporting offset (UTC+8, Singapore time).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::Error;

/// Seconds east of UTC for every date the server reads or prints.
pub const REPORT_UTC_OFFSET_SECS: i32 = 8 * 60 * 60;

/// Human label for the reporting offset.
pub const REPORT_TIMEZONE_LABEL: &str = "Asia/Singapore (SGT)";

/// Formats accepted for calendar dates supplied by callers.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%d %b %Y",
    "%d %B, %Y",
    "%d %b, %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

pub fn report_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse a calendar date such as `2025-05-05` or `5 May 2025`.
pub fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| Error::InvalidDate(input.to_string()))
}

/// Inclusive epoch-millisecond bounds covering whole local days.
///
/// Runs from local midnight of `start` to 23:59:59.999 of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let offset_ms = i64::from(REPORT_UTC_OFFSET_SECS) * 1000;
        let start_ms = start.and_time(NaiveTime::MIN).and_utc().timestamp_millis() - offset_ms;
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        let end_ms = end.and_time(end_of_day).and_utc().timestamp_millis() - offset_ms;
        Self { start_ms, end_ms }
    }

    pub fn contains(&self, ms: i64) -> bool {
        ms >= self.start_ms && ms <= self.end_ms
    }
}

fn local(ms: i64) -> Option<DateTime<FixedOffset>> {
    report_offset().timestamp_millis_opt(ms).single()
}

/// `YYYY-MM-DD HH:MM:SS` in the reporting offset.
pub fn format_timestamp(ms: i64) -> Option<String> {
    local(ms).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// `DD/MM/YYYY, hh:mm:ss am` in the reporting offset.
pub fn format_closed(ms: i64) -> Option<String> {
    local(ms).map(|dt| dt.format("%d/%m/%Y, %I:%M:%S %P").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = date(2025, 5, 5);
        for input in [
            "2025-05-05",
            "2025/05/05",
            "5 May 2025",
            "05 May 2025",
            "5 May, 2025",
            "May 5, 2025",
            "May 5 2025",
            "  2025-05-05  ",
        ] {
            assert_eq!(parse_date(input).unwrap(), expected, "input {:?}", input);
        }
        assert_eq!(parse_date("14 September 2025").unwrap(), date(2025, 9, 14));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("next tuesday").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date: next tuesday");
    }

    #[test]
    fn test_day_range_bounds() {
        let range = DayRange::new(date(2025, 5, 5), date(2025, 5, 11));

        // 2025-05-05T00:00:00+08:00 == 2025-05-04T16:00:00Z
        assert_eq!(range.start_ms, 1_746_374_400_000);
        // 2025-05-11T23:59:59.999+08:00 == 2025-05-11T15:59:59.999Z
        assert_eq!(range.end_ms, 1_746_979_199_999);
    }

    #[test]
    fn test_day_range_is_inclusive() {
        let range = DayRange::new(date(2025, 5, 5), date(2025, 5, 5));
        assert!(range.contains(range.start_ms));
        assert!(range.contains(range.end_ms));
        assert!(!range.contains(range.start_ms - 1));
        assert!(!range.contains(range.end_ms + 1));
    }

    #[test]
    fn test_format_timestamp_uses_offset() {
        // 2023-11-14T22:13:20Z
        assert_eq!(
            format_timestamp(1_700_000_000_000).unwrap(),
            "2023-11-15 06:13:20"
        );
    }

    #[test]
    fn test_format_closed() {
        assert_eq!(
            format_closed(1_700_000_000_000).unwrap(),
            "15/11/2023, 06:13:20 am"
        );
        // 2025-05-05T06:30:00Z is 14:30 local
        assert_eq!(
            format_closed(1_746_426_600_000).unwrap(),
            "05/05/2025, 02:30:00 pm"
        );
    }
}
