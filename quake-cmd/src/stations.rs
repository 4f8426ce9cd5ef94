use anyhow::Context;
use log::info;
use std::path::Path;

use quake_core::station::Station;

/// Print the station list as `code, lat, lng, heliplot link`.
pub fn run_stations(stations_json: &Path) -> anyhow::Result<()> {
    let stations = Station::load(stations_json)
        .with_context(|| format!("failed to load {}", stations_json.display()))?;
    info!("Loaded {} stations", stations.len());
    for station in &stations {
        println!(
            "{:<8} {:>9.4} {:>10.4}  {}",
            station.code, station.latitude, station.longitude, station.link
        );
    }
    Ok(())
}
