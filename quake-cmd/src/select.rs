//! Corridor and rectangle selections written as plot JSON.

use anyhow::Context;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use quake_core::corridor::{select_corridor, Corridor};
use quake_core::feed::client::FeedClient;
use quake_core::feed::QueryWindow;
use quake_core::geo::LatLng;
use quake_core::rectangle::{select_rectangle, BoundingBox};
use quake_data::plot::{cross_section, magnitude_time, PlotError};

use crate::session::{print_notices, Notice, Session};
use crate::PlotKind;

/// Plot data together with the selection that produced it.
#[derive(Serialize)]
struct CorridorOutput<P> {
    outline: [LatLng; 4],
    width_km: f64,
    plot: P,
}

#[derive(Serialize)]
struct BoxOutput<P> {
    bounds: BoundingBox,
    plot: P,
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            info!("Wrote plot data to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, value)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}

async fn refreshed_session(window: QueryWindow) -> anyhow::Result<Session> {
    let client = FeedClient::new()?;
    let mut session = Session::new(client, window);
    let report = session.refresh().await;
    print_notices(&report.notices);
    Ok(session)
}

pub async fn run_cross_section(
    window: QueryWindow,
    from: LatLng,
    to: LatLng,
    width_km: f64,
    plot: PlotKind,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let corridor = Corridor::new(from, to, width_km);
    // reject a bad corridor before touching the network
    let outline = corridor.outline()?;
    let session = refreshed_session(window).await?;
    let events = session.catalog().events();

    let result = match plot {
        PlotKind::Depth => cross_section(events, &corridor).map(|plot| {
            info!("Cross-section with {} events", plot.points.len());
            serde_json::to_value(plot)
        }),
        PlotKind::MagTime => {
            let hits = select_corridor(events, &corridor)?;
            magnitude_time(hits.iter().map(|hit| hit.event)).map(serde_json::to_value)
        }
    };
    match result {
        Ok(plot) => write_json(
            &CorridorOutput {
                outline,
                width_km,
                plot: plot?,
            },
            output,
        ),
        Err(PlotError::EmptySelection) => {
            print_notices(&[Notice::EmptySelection]);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run_box_select(
    window: QueryWindow,
    corner: LatLng,
    opposite: LatLng,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    // reject a bad box before touching the network
    let bounds = BoundingBox::from_corners(corner, opposite)?;
    let session = refreshed_session(window).await?;
    let selected = select_rectangle(session.catalog().events(), corner, opposite)?;
    info!("Rectangle selected {} events", selected.len());

    match magnitude_time(selected) {
        Ok(plot) => write_json(&BoxOutput { bounds, plot }, output),
        Err(PlotError::EmptySelection) => {
            print_notices(&[Notice::EmptySelection]);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
