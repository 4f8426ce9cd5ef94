//! One-shot refresh of both feeds with a summary and optional CSV export.

use anyhow::Context;
use chrono::Utc;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use quake_core::feed::client::FeedClient;
use quake_core::feed::QueryWindow;
use quake_core::geo::LatLng;
use quake_core::local_time::to_local_display_time;
use quake_core::polygon::OKLAHOMA_BOUNDARY;
use quake_data::catalog::EventCatalog;
use quake_data::export::{write_csv, ExportError};
use quake_data::summary::summarize;
use quake_utils::dates::format_display;

use crate::session::{print_notices, Session};

/// Number of events listed after a refresh.
const LISTED_EVENTS: usize = 10;

pub async fn run_fetch(
    window: QueryWindow,
    csv_path: Option<&Path>,
    oklahoma_only: bool,
) -> anyhow::Result<()> {
    let client = FeedClient::new()?;
    let mut session = Session::new(client, window);
    let report = session.refresh().await;
    print_notices(&report.notices);

    let catalog = session.catalog();
    print_summary(catalog);

    if let Some(path) = csv_path {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let boundary: &[LatLng] = &OKLAHOMA_BOUNDARY;
        let region = oklahoma_only.then_some(boundary);
        match write_csv(BufWriter::new(file), catalog.events(), region) {
            Ok(rows) => info!("Wrote {} events to {}", rows, path.display()),
            Err(ExportError::NothingToExport) => eprintln!("Notice: no events to export"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn print_summary(catalog: &EventCatalog) {
    let summary = summarize(catalog.events());
    println!("{} events", summary.count);
    if let (Some(average), Some(max)) = (summary.average_magnitude, summary.max_magnitude) {
        println!("Average magnitude {:.2}, largest {:.1}", average, max);
    }

    for (bucket, events) in catalog.by_recency(Utc::now()) {
        println!("  {:<14} {}", bucket.label(), events.len());
    }

    for event in catalog.newest_first().into_iter().take(LISTED_EVENTS) {
        let time = event
            .time
            .map(|t| format_display(&to_local_display_time(t)))
            .unwrap_or_else(|| "unknown time".to_string());
        let magnitude = event
            .magnitude
            .map(|m| format!("M{:.1}", m))
            .unwrap_or_else(|| "M?".to_string());
        println!(
            "{}  {:<5} {:<4} {}",
            time,
            magnitude,
            event.source.as_str(),
            event.place.as_deref().unwrap_or("")
        );
    }
}
