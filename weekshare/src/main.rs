// weekshare/src/main.rs

mod cli;
mod commands;
mod server;

use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug weekshare serve ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config_dir = cli.config_dir;

    match cli.command {
        // --- USE CASE: HTTP FRONT DOOR + WORKER ---
        Commands::Serve {
            addr,
            processor_url,
            processor_token,
            upstream,
        } => {
            commands::serve::execute(&config_dir, addr, processor_url, processor_token, &upstream)
                .await?
        }

        // --- USE CASE: ONE SHARE RUN ---
        Commands::Process {
            week,
            response_url,
            upstream,
        } => commands::process::execute(&config_dir, week, response_url, &upstream).await?,

        // --- USE CASE: SCHEDULE LOOKUP ---
        Commands::CurrentWeek => commands::current_week::execute(&config_dir)?,

        // --- USE CASE: DRY RUN ---
        Commands::Plan { week } => commands::plan::execute(&config_dir, week)?,
    }

    Ok(())
}
