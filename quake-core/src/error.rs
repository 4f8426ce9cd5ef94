/// Error types for the quake core library
use thiserror::Error;

use crate::event::FeedSource;

/// Rejected selection parameters.
#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum SelectionError {
    /// Both corridor endpoints project onto the same local point
    #[error("degenerate selection: corridor endpoints coincide, the line has no direction")]
    DegenerateCorridor,

    /// Corridor width is zero, negative or not a number
    #[error("invalid corridor width: {0} km")]
    InvalidWidth(f64),

    /// An endpoint or corner is not a usable coordinate
    #[error("invalid selection coordinate: {lat}, {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// Failure to obtain events from one upstream feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The feed answered 400, usually an out-of-range query window
    #[error("{0} rejected the query as a bad request")]
    BadRequest(FeedSource),

    /// Any other non-success status
    #[error("{feed} responded with status {status}")]
    Status { feed: FeedSource, status: u16 },

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request to {feed} failed: {source}")]
    Http {
        feed: FeedSource,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected GeoJSON
    #[error("failed to decode {feed} response: {source}")]
    Decode {
        feed: FeedSource,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    /// The feed this failure belongs to.
    pub fn feed(&self) -> FeedSource {
        match self {
            FeedError::BadRequest(feed) => *feed,
            FeedError::Status { feed, .. } => *feed,
            #[cfg(feature = "api")]
            FeedError::Http { feed, .. } => *feed,
            FeedError::Decode { feed, .. } => *feed,
        }
    }
}

/// Failure to load the station list.
#[derive(Error, Debug)]
pub enum StationError {
    #[error("Failed to read station list: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse station list: {0}")]
    Parse(#[from] serde_json::Error),
}
