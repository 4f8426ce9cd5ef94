use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Age class of an event relative to "now". Never stored on the event:
/// "now" moves, so the bucket is recomputed on every evaluation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecencyBucket {
    /// Less than 24 hours old
    Recent24h,
    /// At least 24 hours, less than 7 days old
    Recent7d,
    /// 7 days or older
    Older,
}

impl RecencyBucket {
    pub const ALL: [RecencyBucket; 3] = [
        RecencyBucket::Recent24h,
        RecencyBucket::Recent7d,
        RecencyBucket::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecencyBucket::Recent24h => "past 24 hours",
            RecencyBucket::Recent7d => "past 7 days",
            RecencyBucket::Older => "older",
        }
    }
}

/// Classify `event_time` against `now`. Upper bounds are exclusive, so an
/// event exactly 24 hours old is in the 7 day bucket.
pub fn classify_age(event_time: DateTime<Utc>, now: DateTime<Utc>) -> RecencyBucket {
    let age = now - event_time;
    if age < TimeDelta::hours(24) {
        RecencyBucket::Recent24h
    } else if age < TimeDelta::days(7) {
        RecencyBucket::Recent7d
    } else {
        RecencyBucket::Older
    }
}
