mod cli;
mod duration;
mod error;
mod jira;
mod report;
mod table;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting prbtime - Incident Duration Reporting Tool");
    cli.execute().await?;

    Ok(())
}
