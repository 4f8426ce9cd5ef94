use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::StationError;
use crate::feed::{number, text};
use crate::geo::LatLng;

const HELIPLOT_URL: &str = "http://wichita.ogs.ou.edu/eq/heliplot";

/// A seismograph station shown alongside events.
///
/// Station lists are JSON arrays of `{"Station", "latitude", "longitude",
/// "html"}` records, one per station code.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Network station code (e.g., "OK030")
    pub code: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Heliplot page for the station
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(default, rename = "Station")]
    station: Option<Value>,
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
    #[serde(default)]
    html: Option<Value>,
}

/// Default heliplot image for a station code.
pub fn heliplot_url(code: &str) -> String {
    format!("{HELIPLOT_URL}/{code}.png")
}

impl Station {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    fn from_record(record: StationRecord) -> Option<Station> {
        let code = record.station.as_ref().and_then(text)?;
        let latitude = record.latitude.as_ref().and_then(number);
        let longitude = record.longitude.as_ref().and_then(number);
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lng)) if LatLng::new(lat, lng).is_valid() => (lat, lng),
            _ => {
                warn!("Skipping station {} without usable coordinates", code);
                return None;
            }
        };
        let link = record
            .html
            .as_ref()
            .and_then(text)
            .unwrap_or_else(|| heliplot_url(&code));
        Some(Station {
            code,
            latitude,
            longitude,
            link,
        })
    }

    /// Parse a JSON station list. Records without a code or usable
    /// coordinates are skipped.
    pub fn parse_station_json(json_object: &str) -> Result<Vec<Station>, StationError> {
        let records: Vec<StationRecord> = serde_json::from_str(json_object)?;
        Ok(records.into_iter().filter_map(Station::from_record).collect())
    }

    /// Read and parse a station list file.
    pub fn load(path: &Path) -> Result<Vec<Station>, StationError> {
        let contents = fs::read_to_string(path)?;
        Station::parse_station_json(&contents)
    }
}
