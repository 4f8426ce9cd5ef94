use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::LatLng;

/// Events shallower than this are classed as quarry blasts.
pub const QUARRY_DEPTH_THRESHOLD_KM: f64 = 0.05;

/// The upstream feed an event was normalized from.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum FeedSource {
    /// USGS FDSN event service, regional coverage
    Usgs,
    /// Oklahoma Geological Survey catalog, higher resolution inside the state
    Ogs,
}

impl FeedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSource::Usgs => "USGS",
            FeedSource::Ogs => "OGS",
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of seismic source.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Earthquake,
    Quarry,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Earthquake => "earthquake",
            EventCategory::Quarry => "quarry",
        }
    }
}

/// A seismic event normalized from either feed.
///
/// Optional fields stay `None` when the feed omits them; an unknown depth is
/// never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable key; events without one cannot be catalogued
    pub id: Option<String>,
    pub source: FeedSource,
    pub position: Option<LatLng>,
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
    /// Origin time
    pub time: Option<DateTime<Utc>>,
    pub place: Option<String>,
    pub status: Option<String>,
    /// Explicit category flag sent by the feed, overrides the depth rule
    pub quarry: Option<bool>,
}

impl Event {
    /// An event with only an id, a source and a position set.
    pub fn new(id: impl Into<String>, source: FeedSource, position: LatLng) -> Self {
        Event {
            id: Some(id.into()),
            source,
            position: Some(position),
            depth_km: None,
            magnitude: None,
            time: None,
            place: None,
            status: None,
            quarry: None,
        }
    }

    /// Position usable by geometry operations, if any.
    pub fn geometry_position(&self) -> Option<LatLng> {
        self.position.filter(LatLng::is_valid)
    }

    /// An event needs an id to be deduplicated and cross-referenced.
    pub fn is_renderable(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn category(&self) -> EventCategory {
        let quarry = match (self.quarry, self.depth_km) {
            (Some(flag), _) => flag,
            (None, Some(depth)) => depth < QUARRY_DEPTH_THRESHOLD_KM,
            (None, None) => false,
        };
        if quarry {
            EventCategory::Quarry
        } else {
            EventCategory::Earthquake
        }
    }
}
