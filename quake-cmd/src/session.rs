//! Session state shared by the subcommands: the feed client, the active
//! query window and the event catalog.

use log::{info, warn};
use std::fmt;

use quake_core::error::FeedError;
use quake_core::event::{Event, FeedSource};
use quake_core::feed::client::FeedClient;
use quake_core::feed::QueryWindow;
use quake_core::polygon::{partition_by_region, OKLAHOMA_BOUNDARY};
use quake_data::catalog::EventCatalog;

/// Non-fatal condition reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A feed rejected the query outright
    BadRequest(FeedSource),
    /// A feed failed for any other reason; its previous events are kept
    FeedUnavailable { feed: FeedSource, reason: String },
    /// A selection matched no events
    EmptySelection,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::BadRequest(feed) => write!(
                f,
                "{} rejected the request (bad request); check the date range and magnitude",
                feed
            ),
            Notice::FeedUnavailable { feed, reason } => {
                write!(f, "{} data is unavailable: {}", feed, reason)
            }
            Notice::EmptySelection => write!(f, "No events found in the selected area"),
        }
    }
}

impl From<&FeedError> for Notice {
    fn from(error: &FeedError) -> Self {
        match error {
            FeedError::BadRequest(feed) => Notice::BadRequest(*feed),
            other => Notice::FeedUnavailable {
                feed: other.feed(),
                reason: other.to_string(),
            },
        }
    }
}

/// Show notices to the user on stderr.
pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("Notice: {}", notice);
    }
}

/// Outcome of one full refresh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RefreshReport {
    /// Events kept per feed, `None` when the feed failed
    pub usgs: Option<usize>,
    pub ogs: Option<usize>,
    /// USGS events dropped because OGS covers their location
    pub suppressed: usize,
    pub notices: Vec<Notice>,
}

pub struct Session {
    client: FeedClient,
    window: QueryWindow,
    catalog: EventCatalog,
}

impl Session {
    pub fn new(client: FeedClient, window: QueryWindow) -> Self {
        Session {
            client,
            window,
            catalog: EventCatalog::new(),
        }
    }

    pub fn window(&self) -> &QueryWindow {
        &self.window
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Fetch both feeds concurrently and replace each feed's events with the
    /// new response. A failed feed leaves its previous events in place.
    pub async fn refresh(&mut self) -> RefreshReport {
        info!(
            "Refreshing events from {} to {}, magnitude >= {}",
            self.window.start, self.window.end, self.window.min_magnitude
        );
        let (usgs, ogs) = tokio::join!(
            self.client.fetch_usgs(&self.window),
            self.client.fetch_ogs(&self.window)
        );
        apply_refresh(&mut self.catalog, usgs, ogs)
    }

    /// Fetch OGS and add only events not seen before. Returns the number of
    /// new events.
    pub async fn poll_ogs(&mut self) -> Result<usize, Notice> {
        match self.client.fetch_ogs(&self.window).await {
            Ok(events) => {
                let added = self.catalog.merge_new(events);
                info!("Poll added {} new OGS events", added);
                Ok(added)
            }
            Err(error) => {
                warn!("OGS poll failed: {}", error);
                Err(Notice::from(&error))
            }
        }
    }
}

/// Apply one refresh worth of feed results to `catalog`.
///
/// USGS events inside the Oklahoma boundary are suppressed, the OGS catalog
/// is authoritative there.
pub fn apply_refresh(
    catalog: &mut EventCatalog,
    usgs: Result<Vec<Event>, FeedError>,
    ogs: Result<Vec<Event>, FeedError>,
) -> RefreshReport {
    let mut report = RefreshReport::default();

    match usgs {
        Ok(events) => {
            let split = partition_by_region(events, &OKLAHOMA_BOUNDARY);
            report.suppressed = split.inside.len();
            report.usgs = Some(split.outside.len());
            catalog.replace_source(FeedSource::Usgs, split.outside);
        }
        Err(error) => {
            warn!("USGS refresh failed: {}", error);
            report.notices.push(Notice::from(&error));
        }
    }

    match ogs {
        Ok(events) => {
            report.ogs = Some(events.len());
            catalog.replace_source(FeedSource::Ogs, events);
        }
        Err(error) => {
            warn!("OGS refresh failed: {}", error);
            report.notices.push(Notice::from(&error));
        }
    }

    info!(
        "Catalog holds {} events ({} USGS events suppressed)",
        catalog.len(),
        report.suppressed
    );
    report
}
