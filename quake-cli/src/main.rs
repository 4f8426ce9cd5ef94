//! quake CLI - select and plot seismic events from the USGS and OGS feeds.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "quake-cli",
    version,
    about = "Seismic event selection and cross-section toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: quake_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Starting quake-cli");
    quake_cmd::run(cli.command).await
}
