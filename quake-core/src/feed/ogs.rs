//! Oklahoma Geological Survey event service (GeoJSON).
//!
//! The OGS catalog has carried several generations of field names, so every
//! value is resolved through one precedence order: the explicit field, then
//! the legacy or alternate field, then whatever the geometry can supply.
//!
//! | value     | precedence                                   |
//! |-----------|----------------------------------------------|
//! | id        | `event_id`, `id`, `objectid`, feature `id`   |
//! | time      | `origintime`, `time`                         |
//! | magnitude | `prefmag`, `mag`                             |
//! | depth     | `depth`, `geometry.coordinates[2]`           |
//! | place     | `county`, `state`                            |
//!
//! OGS identifiers are published with an `ogs` prefix while the USGS event
//! pages use `ok`; ids are rewritten `ogs…` → `ok…` so both feeds and the
//! event pages agree on one key.

use serde::Deserialize;
use serde_json::Value;

use super::{first_of, number, text, Feature, FeatureCollection, QueryWindow};
use crate::event::{Event, FeedSource};
use quake_utils::dates::{parse_instant, OGS_FORMAT};

pub const OGS_EVENT_URL: &str = "https://ogsweb.ou.edu/api/earthquake";

const LEGACY_ID_PREFIX: &str = "ogs";
const ID_PREFIX: &str = "ok";

#[derive(Debug, Default, Deserialize)]
pub struct OgsProperties {
    #[serde(default)]
    pub event_id: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub objectid: Option<Value>,
    #[serde(default)]
    pub origintime: Option<Value>,
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub prefmag: Option<Value>,
    #[serde(default)]
    pub mag: Option<Value>,
    #[serde(default)]
    pub depth: Option<Value>,
    #[serde(default)]
    pub county: Option<Value>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default, rename = "isQuarry")]
    pub is_quarry: Option<Value>,
}

/// Rewrite an OGS identifier into the shared `ok…` form. Other ids pass
/// through unchanged.
pub fn normalize_event_id(raw: &str) -> String {
    match raw.strip_prefix(LEGACY_ID_PREFIX) {
        Some(rest) => format!("{ID_PREFIX}{rest}"),
        None => raw.to_string(),
    }
}

/// Build the query URL for `window`. The end is always 23:59 of the end day.
pub fn query_url(window: &QueryWindow) -> String {
    format!(
        "{}?start={}&end={}&mag={}&format=geojson",
        OGS_EVENT_URL,
        window.starts_at().format(OGS_FORMAT),
        window.ends_at().format(OGS_FORMAT),
        window.min_magnitude,
    )
}

fn instant(value: &Value) -> Option<chrono::DateTime<chrono::Utc>> {
    match value {
        Value::String(s) => parse_instant(s).ok(),
        Value::Number(n) => n.as_i64().and_then(quake_utils::dates::from_epoch_millis),
        _ => None,
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "1" => Some(true),
            "false" | "f" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Normalize one OGS feature. Features without geometry are dropped.
pub fn normalize_feature(feature: Feature<OgsProperties>) -> Option<Event> {
    let geometry = feature.geometry?;
    let p = feature.properties.unwrap_or_default();
    let id = first_of(&[&p.event_id, &p.id, &p.objectid, &feature.id], text)
        .map(|raw| normalize_event_id(&raw));
    Some(Event {
        id,
        source: FeedSource::Ogs,
        position: geometry.position(),
        depth_km: first_of(&[&p.depth], number).or_else(|| geometry.depth()),
        magnitude: first_of(&[&p.prefmag, &p.mag], number),
        time: first_of(&[&p.origintime, &p.time], instant),
        place: first_of(&[&p.county, &p.state], text),
        status: first_of(&[&p.status], text),
        quarry: first_of(&[&p.is_quarry], flag),
    })
}

/// Decode an OGS response body, keeping events inside `window`.
///
/// Events without an origin time are kept; the feed occasionally returns
/// rows just outside the requested range and those are dropped.
pub fn parse_feed(body: &str, window: &QueryWindow) -> Result<Vec<Event>, serde_json::Error> {
    let collection: FeatureCollection<OgsProperties> = serde_json::from_str(body)?;
    Ok(collection
        .features
        .into_iter()
        .filter_map(normalize_feature)
        .filter(|event| event.time.map_or(true, |time| window.contains(&time)))
        .collect())
}
