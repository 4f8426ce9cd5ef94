//! Command implementations for the quake CLI.
//!
//! Provides subcommands for fetching both event feeds, selecting events by
//! corridor or rectangle, polling for new events and listing stations.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use quake_core::corridor::DEFAULT_WIDTH_KM;
use quake_core::feed::QueryWindow;
use quake_core::geo::LatLng;
use quake_utils::dates::{check_range, parse_date};

pub mod fetch;
pub mod select;
pub mod session;
pub mod stations;
pub mod watch;

/// Days covered when `--start` is omitted.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Seconds between OGS polls in `watch`.
pub const DEFAULT_POLL_SECS: u64 = 60;

/// Query window shared by every data command.
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// First day to query (YYYY-MM-DD) [default: 30 days before --end]
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last day to query, inclusive (YYYY-MM-DD) [default: today]
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Minimum magnitude requested from both feeds
    #[arg(long = "min-mag", default_value_t = 0.0)]
    pub min_mag: f64,
}

impl WindowArgs {
    /// Resolve defaults against `today` and validate the range.
    pub fn to_window(&self, today: NaiveDate) -> anyhow::Result<QueryWindow> {
        let end = self.end.unwrap_or(today);
        let start = self
            .start
            .unwrap_or(end - TimeDelta::days(DEFAULT_WINDOW_DAYS));
        check_range(&start, &end)?;
        Ok(QueryWindow {
            start,
            end,
            min_magnitude: self.min_mag,
        })
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Depth against distance along the corridor
    Depth,
    /// Magnitude against time
    MagTime,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch both feeds, print a summary and optionally export CSV
    Fetch {
        #[command(flatten)]
        window: WindowArgs,

        /// Output path for an events CSV
        #[arg(short = 'o', long)]
        csv: Option<PathBuf>,

        /// Only export events inside Oklahoma
        #[arg(long)]
        oklahoma_only: bool,
    },

    /// Select events along a line and write plot data as JSON
    CrossSection {
        #[command(flatten)]
        window: WindowArgs,

        /// Line start as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: LatLng,

        /// Line end as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        to: LatLng,

        /// Corridor width in kilometers
        #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH_KM)]
        width_km: f64,

        #[arg(long, value_enum, default_value_t = PlotKind::Depth)]
        plot: PlotKind,

        /// Output path for plot JSON [default: stdout]
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Select events inside a rectangle and write magnitude/time plot data
    BoxSelect {
        #[command(flatten)]
        window: WindowArgs,

        /// One corner as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        corner: LatLng,

        /// Opposite corner as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        opposite: LatLng,

        /// Output path for plot JSON [default: stdout]
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Refresh once, then poll OGS for new events
    Watch {
        #[command(flatten)]
        window: WindowArgs,

        /// Seconds between polls
        #[arg(long, default_value_t = DEFAULT_POLL_SECS)]
        interval_secs: u64,

        /// Stop after this many polls [default: run until interrupted]
        #[arg(long)]
        polls: Option<u64>,
    },

    /// List seismograph stations from a JSON station file
    Stations {
        /// Path to the station list
        #[arg(short = 's', long, default_value = "stations.json")]
        stations_json: PathBuf,
    },
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Parse "LAT,LNG" in decimal degrees.
pub fn parse_lat_lng(s: &str) -> Result<LatLng, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude {lat:?}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude {lng:?}"))?;
    let point = LatLng::new(lat, lng);
    if !point.is_valid() {
        return Err(format!("coordinate out of range: {s}"));
    }
    Ok(point)
}

/// Calendar day of `now` in UTC, the frame query windows are expressed in.
fn utc_day(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

fn today() -> NaiveDate {
    utc_day(Utc::now())
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            window,
            csv,
            oklahoma_only,
        } => fetch::run_fetch(window.to_window(today())?, csv.as_deref(), oklahoma_only).await,
        Command::CrossSection {
            window,
            from,
            to,
            width_km,
            plot,
            output,
        } => {
            select::run_cross_section(
                window.to_window(today())?,
                from,
                to,
                width_km,
                plot,
                output.as_deref(),
            )
            .await
        }
        Command::BoxSelect {
            window,
            corner,
            opposite,
            output,
        } => {
            select::run_box_select(window.to_window(today())?, corner, opposite, output.as_deref())
                .await
        }
        Command::Watch {
            window,
            interval_secs,
            polls,
        } => watch::run_watch(window.to_window(today())?, interval_secs, polls).await,
        Command::Stations { stations_json } => stations::run_stations(&stations_json),
    }
}
