//! Shared utility functions for the quake crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

    use crate::error::DateError;

    /// Timestamp format expected by the FDSN event service: "YYYY-MM-DDTHH:MM:SS"
    pub const FDSN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    /// Timestamp format expected by the OGS event service: "YYYYMMDDHHMM"
    pub const OGS_FORMAT: &str = "%Y%m%d%H%M";

    /// Human readable timestamp used in listings and exports.
    pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// First instant of `date` in UTC (00:00:00).
    pub fn start_of_day(date: &NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
    }

    /// Last whole second of `date` in UTC (23:59:59).
    pub fn end_of_day(date: &NaiveDate) -> DateTime<Utc> {
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&date.and_time(last))
    }

    /// Format an instant for display, e.g. "2025-06-01 14:03:27".
    pub fn format_display<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        instant.format(DISPLAY_FORMAT).to_string()
    }

    /// Parse an origin time the way the feeds send them.
    ///
    /// Accepts RFC 3339 (with offset or `Z`) and offset-less
    /// "YYYY-MM-DD HH:MM:SS" / "YYYY-MM-DDTHH:MM:SS" strings, optionally with
    /// fractional seconds. Offset-less values are taken as UTC.
    pub fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
        anyhow::bail!("unrecognized timestamp: {s}")
    }

    /// Reject a date range whose start falls after its end.
    pub fn check_range(start: &NaiveDate, end: &NaiveDate) -> Result<(), DateError> {
        if start > end {
            return Err(DateError(format!(
                "start date {} is after end date {}",
                format_date(start),
                format_date(end)
            )));
        }
        Ok(())
    }

    /// Convert epoch milliseconds to an instant.
    pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(millis)
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
