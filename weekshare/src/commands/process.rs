// weekshare/src/commands/process.rs
//
// USE CASE: One share run from the command line (cron or manual replay).

use std::path::Path;

use weekshare_core::application::ProcessOutcome;
use weekshare_core::domain::command::HandOff;

use crate::cli::UpstreamArgs;
use crate::commands::build_processor;

pub async fn execute(
    config_dir: &Path,
    week: Option<u32>,
    response_url: Option<String>,
    upstream: &UpstreamArgs,
) -> anyhow::Result<()> {
    let processor = build_processor(config_dir, upstream).await?;

    let handoff = HandOff {
        week,
        response_url,
        user_name: None,
    };
    let outcome = processor.process(handoff).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let ProcessOutcome::Failed { message } = outcome {
        eprintln!("\n❌ FAILURE. {}", message);
        // Exit with error code for cron / CI
        std::process::exit(1);
    }
    Ok(())
}
