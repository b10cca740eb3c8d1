// weekshare/src/commands/mod.rs

pub mod current_week;
pub mod plan;
pub mod process;
pub mod serve;

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

use weekshare_core::application::ShareProcessor;
use weekshare_core::infrastructure::{
    FileSettingsLoader, GoogleDriveStore, JinjaRenderer, ReqwestChannelTransport, SlackNotifier,
    SystemClock,
};

use crate::cli::UpstreamArgs;

/// Wires the production adapters around the processor.
pub async fn build_processor(
    config_dir: &Path,
    upstream: &UpstreamArgs,
) -> anyhow::Result<Arc<ShareProcessor>> {
    let store = GoogleDriveStore::connect(upstream.google_credentials.as_deref())
        .await
        .context("Failed to initialize the Google Drive client")?;
    let notifier = SlackNotifier::new(
        upstream.slack_bot_token.clone(),
        upstream.slack_channel_id.clone(),
    )
    .context("Failed to initialize the Slack client")?;
    let transport =
        ReqwestChannelTransport::new().context("Failed to initialize the response channel client")?;

    Ok(Arc::new(ShareProcessor::new(
        Arc::new(FileSettingsLoader::new(config_dir)),
        Arc::new(store),
        Arc::new(notifier),
        Arc::new(transport),
        Arc::new(JinjaRenderer::new()),
        Arc::new(SystemClock),
    )))
}
