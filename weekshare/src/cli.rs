// weekshare/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weekshare")]
#[command(about = "Shares weekly lecture folders with every cohort, from Slack or on schedule", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding weekshare.yaml, schedule.yml, folders.yml and users.txt
    #[arg(long, global = true, env = "WEEKSHARE_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🌐 Serves the slash command front door and the worker endpoint
    Serve {
        #[arg(long, env = "WEEKSHARE_ADDR", default_value = "0.0.0.0:8080")]
        addr: SocketAddr,

        /// Worker endpoint receiving hand-offs. Processes inline when absent.
        #[arg(long, env = "WEEKSHARE_PROCESSOR_URL")]
        processor_url: Option<String>,

        /// Shared secret expected in `x-weekshare-token` on /tasks/share
        #[arg(long, env = "WEEKSHARE_PROCESSOR_TOKEN", hide_env_values = true)]
        processor_token: Option<String>,

        #[command(flatten)]
        upstream: UpstreamArgs,
    },

    /// 🚀 Runs one share (scheduled trigger when --week is absent)
    Process {
        #[arg(long, short)]
        week: Option<u32>,

        /// Slack response_url to report to
        #[arg(long)]
        response_url: Option<String>,

        #[command(flatten)]
        upstream: UpstreamArgs,
    },

    /// 📅 Prints the week active today (KST)
    CurrentWeek,

    /// 🗺️  Dry run: which cohort gets which week folder, no API call
    Plan {
        #[arg(long, short)]
        week: u32,
    },
}

/// Credentials of the Drive and Slack adapters.
#[derive(Args, Debug, Clone, Default)]
pub struct UpstreamArgs {
    /// Service account JSON. Ambient GCP credentials are used when absent.
    #[arg(long, env = "GOOGLE_CREDENTIALS", hide_env_values = true)]
    pub google_credentials: Option<String>,

    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub slack_bot_token: Option<String>,

    #[arg(long, env = "SLACK_CHANNEL_ID")]
    pub slack_channel_id: Option<String>,
}
