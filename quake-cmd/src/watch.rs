//! Refresh once, then poll OGS on a fixed interval and report new events.
//!
//! Only ids not already in the catalog are added, so a poll never changes
//! events loaded by the initial refresh.

use log::info;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use quake_core::feed::client::FeedClient;
use quake_core::feed::QueryWindow;

use crate::session::{print_notices, Session};

pub async fn run_watch(
    window: QueryWindow,
    interval_secs: u64,
    polls: Option<u64>,
) -> anyhow::Result<()> {
    if interval_secs == 0 {
        anyhow::bail!("poll interval must be at least one second");
    }
    let client = FeedClient::new()?;
    let mut session = Session::new(client, window);
    let report = session.refresh().await;
    print_notices(&report.notices);
    println!("{} events loaded", session.catalog().len());

    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    let mut completed = 0;
    while polls.map_or(true, |limit| completed < limit) {
        ticker.tick().await;
        match session.poll_ogs().await {
            Ok(0) => info!("No new events"),
            Ok(added) => println!(
                "{} new events, {} total",
                added,
                session.catalog().len()
            ),
            Err(notice) => print_notices(&[notice]),
        }
        completed += 1;
    }
    Ok(())
}
