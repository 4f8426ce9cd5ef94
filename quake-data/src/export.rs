//! CSV export of catalogued events.
//!
//! Every field is quoted and records end in CRLF so the file opens cleanly
//! in spreadsheet tools.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use std::io::Write;
use thiserror::Error;

use quake_core::event::Event;
use quake_core::geo::LatLng;
use quake_core::local_time::to_local_display_time;
use quake_core::polygon;
use quake_utils::dates::format_display;

pub const CSV_HEADER: [&str; 11] = [
    "id",
    "source",
    "time_utc",
    "time_local",
    "latitude",
    "longitude",
    "depth_km",
    "magnitude",
    "category",
    "place",
    "status",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no events to export")]
    NothingToExport,

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn event_record(event: &Event) -> [String; 11] {
    let (time_utc, time_local) = match event.time {
        Some(time) => (
            format_display(&time),
            format_display(&to_local_display_time(time)),
        ),
        None => (String::new(), String::new()),
    };
    [
        optional(event.id.as_deref()),
        event.source.as_str().to_string(),
        time_utc,
        time_local,
        optional(event.geometry_position().map(|p| p.lat)),
        optional(event.geometry_position().map(|p| p.lng)),
        optional(event.depth_km),
        optional(event.magnitude),
        event.category().as_str().to_string(),
        optional(event.place.as_deref()),
        optional(event.status.as_deref()),
    ]
}

/// Write `events` as CSV to `writer`, optionally keeping only events inside
/// `region`. Returns the number of rows written.
pub fn write_csv<'a, W, I>(
    writer: W,
    events: I,
    region: Option<&[LatLng]>,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Event>,
{
    let rows: Vec<&Event> = events
        .into_iter()
        .filter(|event| event.is_renderable())
        .filter(|event| match region {
            Some(ring) => event
                .geometry_position()
                .is_some_and(|position| polygon::contains(position, ring)),
            None => true,
        })
        .collect();
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for event in &rows {
        csv_writer.write_record(event_record(event))?;
    }
    csv_writer.flush()?;
    info!("Exported {} events", rows.len());
    Ok(rows.len())
}
