pub mod corridor;
pub mod error;
pub mod event;
pub mod feed;
pub mod geo;
pub mod local_time;
pub mod polygon;
pub mod recency;
pub mod rectangle;
pub mod station;
