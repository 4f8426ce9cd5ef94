//! UTC to US Central display time with a hand-maintained daylight saving
//! calendar.
//!
//! Years missing from [`DST_WINDOWS`] never get daylight saving. Extend the
//! table each year; there is no rule engine behind it.

use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeZone, Utc};

const STANDARD_OFFSET_HOURS: i32 = 6;
const DAYLIGHT_OFFSET_HOURS: i32 = 5;

/// One year's daylight saving interval, begin inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstWindow {
    pub year: i32,
    /// (month, day, hour) in UTC
    pub begins: (u32, u32, u32),
    /// (month, day, hour) in UTC
    pub ends: (u32, u32, u32),
}

pub const DST_WINDOWS: [DstWindow; 2] = [
    DstWindow {
        year: 2024,
        begins: (3, 10, 8),
        ends: (11, 3, 7),
    },
    DstWindow {
        year: 2025,
        begins: (3, 9, 8),
        ends: (11, 2, 7),
    },
];

impl DstWindow {
    fn instant(&self, (month, day, hour): (u32, u32, u32)) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(self.year, month, day, hour, 0, 0).single()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        match (self.instant(self.begins), self.instant(self.ends)) {
            (Some(begins), Some(ends)) => *instant >= begins && *instant < ends,
            _ => false,
        }
    }
}

/// Whether the daylight offset applies at `instant`.
pub fn is_dst(instant: &DateTime<Utc>) -> bool {
    DST_WINDOWS
        .iter()
        .find(|window| window.year == instant.year())
        .is_some_and(|window| window.contains(instant))
}

/// Offset west of UTC in effect at `instant`.
pub fn utc_offset(instant: &DateTime<Utc>) -> FixedOffset {
    let hours = if is_dst(instant) {
        DAYLIGHT_OFFSET_HOURS
    } else {
        STANDARD_OFFSET_HOURS
    };
    FixedOffset::west_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
}

/// `instant` expressed in local display time.
pub fn to_local_display_time(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    instant.with_timezone(&utc_offset(&instant))
}
