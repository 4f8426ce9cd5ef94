//! Chart-ready data for the cross-section and magnitude/time plots.

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use thiserror::Error;

use quake_core::corridor::{select_corridor, Corridor};
use quake_core::error::SelectionError;
use quake_core::event::Event;

/// Depth axis upper bound when no event has a positive depth.
pub const DEFAULT_DEPTH_AXIS_KM: f64 = 10.0;
const DEPTH_AXIS_HEADROOM: f64 = 1.1;

#[derive(Error, Debug, PartialEq)]
pub enum PlotError {
    #[error("no events in the selected area")]
    EmptySelection,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSectionPoint {
    pub id: Option<String>,
    pub distance_km: f64,
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

/// Depth against distance along a corridor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSectionPlot {
    pub length_km: f64,
    /// Depth axis runs from 0 down to this value
    pub max_depth_km: f64,
    pub points: Vec<CrossSectionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeTimePoint {
    pub id: Option<String>,
    pub time: DateTime<Utc>,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeTimeSeries {
    pub points: Vec<MagnitudeTimePoint>,
}

/// Build the cross-section for `corridor`. Points keep corridor order.
pub fn cross_section(events: &[Event], corridor: &Corridor) -> Result<CrossSectionPlot, PlotError> {
    let hits = select_corridor(events, corridor)?;
    if hits.is_empty() {
        return Err(PlotError::EmptySelection);
    }
    let points: Vec<CrossSectionPoint> = hits
        .iter()
        .map(|hit| CrossSectionPoint {
            id: hit.event.id.clone(),
            distance_km: hit.distance_along_km,
            depth_km: hit.event.depth_km,
            magnitude: hit.event.magnitude,
            time: hit.event.time,
        })
        .collect();
    let max_depth_km = points
        .iter()
        .filter_map(|point| point.depth_km)
        .filter(|depth| *depth > 0.0)
        .max_by(|a, b| a.total_cmp(b))
        .map_or(DEFAULT_DEPTH_AXIS_KM, |depth| depth * DEPTH_AXIS_HEADROOM);
    debug!(
        "Cross-section: {} points, depth axis {:.1} km",
        points.len(),
        max_depth_km
    );
    Ok(CrossSectionPlot {
        length_km: corridor.length_km()?,
        max_depth_km,
        points,
    })
}

/// Magnitude against time, ascending by time. Events missing either value
/// are left out.
pub fn magnitude_time<'a, I>(events: I) -> Result<MagnitudeTimeSeries, PlotError>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut points: Vec<MagnitudeTimePoint> = events
        .into_iter()
        .filter_map(|event| {
            Some(MagnitudeTimePoint {
                id: event.id.clone(),
                time: event.time?,
                magnitude: event.magnitude?,
            })
        })
        .collect();
    if points.is_empty() {
        return Err(PlotError::EmptySelection);
    }
    points.sort_by_key(|point| point.time);
    Ok(MagnitudeTimeSeries { points })
}
