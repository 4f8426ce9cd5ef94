//! USGS FDSN event service (GeoJSON).
//!
//! Query: `https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&starttime=..&endtime=..`
//! with a fixed regional bounding box and `minmagnitude`. `properties.time` is
//! epoch milliseconds and depth is the third geometry coordinate.

use serde::Deserialize;
use serde_json::Value;

use super::{first_of, number, text, Feature, FeatureCollection, QueryWindow};
use crate::event::{Event, FeedSource};
use crate::rectangle::BoundingBox;
use quake_utils::dates::{from_epoch_millis, parse_instant, FDSN_FORMAT};

pub const USGS_EVENT_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Region requested from USGS, wide enough to surround the OGS coverage.
pub const USGS_QUERY_BOUNDS: BoundingBox = BoundingBox {
    south: 25.0,
    north: 45.0,
    west: -108.0,
    east: -90.0,
};

#[derive(Debug, Default, Deserialize)]
pub struct UsgsProperties {
    #[serde(default)]
    pub mag: Option<Value>,
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub place: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

/// Build the query URL for `window`.
pub fn query_url(window: &QueryWindow) -> String {
    format!(
        "{}?format=geojson&starttime={}&endtime={}&minlatitude={}&maxlatitude={}&minlongitude={}&maxlongitude={}&minmagnitude={}",
        USGS_EVENT_URL,
        window.starts_at().format(FDSN_FORMAT),
        window.ends_at().format(FDSN_FORMAT),
        USGS_QUERY_BOUNDS.south,
        USGS_QUERY_BOUNDS.north,
        USGS_QUERY_BOUNDS.west,
        USGS_QUERY_BOUNDS.east,
        window.min_magnitude,
    )
}

fn instant(value: &Value) -> Option<chrono::DateTime<chrono::Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(from_epoch_millis),
        Value::String(s) => parse_instant(s).ok(),
        _ => None,
    }
}

/// Normalize one USGS feature.
pub fn normalize_feature(feature: Feature<UsgsProperties>) -> Event {
    let properties = feature.properties.unwrap_or_default();
    let geometry = feature.geometry.unwrap_or_default();
    Event {
        id: feature.id.as_ref().and_then(text),
        source: FeedSource::Usgs,
        position: geometry.position(),
        depth_km: geometry.depth(),
        magnitude: first_of(&[&properties.mag], number),
        time: first_of(&[&properties.time], instant),
        place: first_of(&[&properties.place], text),
        status: first_of(&[&properties.status], text),
        quarry: None,
    }
}

/// Decode a USGS response body into normalized events.
pub fn parse_feed(body: &str) -> Result<Vec<Event>, serde_json::Error> {
    let collection: FeatureCollection<UsgsProperties> = serde_json::from_str(body)?;
    Ok(collection
        .features
        .into_iter()
        .map(normalize_feature)
        .collect())
}
