//! Upstream feeds and the GeoJSON shapes they share.
//!
//! Both feeds answer with a GeoJSON `FeatureCollection`, but the property
//! names differ and the OGS feed mixes numbers and numeric strings. Values
//! are read loosely here and normalized into [`Event`](crate::event::Event)
//! by the per-feed modules.

#[cfg(feature = "api")]
pub mod client;
pub mod ogs;
pub mod usgs;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::geo::LatLng;
use quake_utils::dates::{end_of_day, start_of_day};

/// Time range and magnitude floor shared by both feed queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min_magnitude: f64,
}

impl QueryWindow {
    /// 00:00:00 UTC of the start day.
    pub fn starts_at(&self) -> DateTime<Utc> {
        start_of_day(&self.start)
    }

    /// 23:59:59 UTC of the end day.
    pub fn ends_at(&self) -> DateTime<Utc> {
        end_of_day(&self.end)
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.starts_at() && *instant <= self.ends_at()
    }
}

#[derive(Debug, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(default = "Vec::new")]
    pub features: Vec<Feature<P>>,
}

#[derive(Debug, Deserialize)]
pub struct Feature<P> {
    #[serde(default)]
    pub id: Option<Value>,
    pub properties: Option<P>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// GeoJSON point geometry, `[lng, lat, depth]`.
#[derive(Debug, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<Value>,
}

impl Geometry {
    /// Both horizontal components, or nothing.
    pub fn position(&self) -> Option<LatLng> {
        let lng = self.coordinates.first().and_then(number)?;
        let lat = self.coordinates.get(1).and_then(number)?;
        Some(LatLng::new(lat, lng))
    }

    /// Third coordinate, depth in kilometers.
    pub fn depth(&self) -> Option<f64> {
        self.coordinates.get(2).and_then(number)
    }
}

/// A finite number sent either as a JSON number or a numeric string.
pub(crate) fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// A non-empty string, accepting numbers for id-like fields.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present value in precedence order.
pub(crate) fn first_of<T>(
    candidates: &[&Option<Value>],
    read: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|candidate| candidate.as_ref())
        .find_map(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_strings() {
        assert_eq!(number(&json!(2.5)), Some(2.5));
        assert_eq!(number(&json!(" 3.1 ")), Some(3.1));
        assert_eq!(number(&json!("n/a")), None);
        assert_eq!(number(&json!(null)), None);
        assert_eq!(number(&json!("NaN")), None);
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(text(&json!("ogs2025abc")), Some("ogs2025abc".to_string()));
        assert_eq!(text(&json!(1234)), Some("1234".to_string()));
        assert_eq!(text(&json!("")), None);
        assert_eq!(text(&json!(false)), None);
    }

    #[test]
    fn test_first_of_skips_unusable_values() {
        let explicit = Some(json!(""));
        let legacy = Some(json!("1.9"));
        assert_eq!(first_of(&[&explicit, &legacy], number), Some(1.9));
        assert_eq!(first_of(&[&None, &None], number), None);
    }

    #[test]
    fn test_geometry_accessors() {
        let geometry = Geometry {
            coordinates: vec![json!(-97.5), json!("35.25"), json!(null)],
        };
        assert_eq!(geometry.position(), Some(LatLng::new(35.25, -97.5)));
        assert_eq!(geometry.depth(), None);
        assert_eq!(Geometry::default().position(), None);
    }

    #[test]
    fn test_window_bounds() {
        let window = QueryWindow {
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            min_magnitude: 0.0,
        };
        assert!(window.contains(&window.starts_at()));
        assert!(window.contains(&window.ends_at()));
        assert!(!window.contains(&(window.ends_at() + chrono::TimeDelta::seconds(1))));
    }
}
