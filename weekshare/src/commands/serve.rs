// weekshare/src/commands/serve.rs
//
// USE CASE: HTTP front door + worker endpoint.

use anyhow::Context;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use weekshare_core::application::{ACK_BUDGET, CommandDispatcher, Dispatch};
use weekshare_core::infrastructure::{FileSettingsLoader, HttpTaskInvoker, JinjaRenderer};
use weekshare_core::ports::TaskInvoker;

use crate::cli::UpstreamArgs;
use crate::commands::build_processor;
use crate::server::{AppState, router};

pub async fn execute(
    config_dir: &Path,
    addr: SocketAddr,
    processor_url: Option<String>,
    processor_token: Option<String>,
    upstream: &UpstreamArgs,
) -> anyhow::Result<()> {
    let processor = build_processor(config_dir, upstream).await?;

    let dispatch = match processor_url {
        Some(url) => {
            let invoker = HttpTaskInvoker::new(url, processor_token.clone(), ACK_BUDGET)
                .context("Invalid WEEKSHARE_PROCESSOR_URL")?;
            info!(worker = %invoker.target(), "Hand-offs go to the worker endpoint");
            Dispatch::Remote(Arc::new(invoker))
        }
        None => {
            info!("No processor url, commands are processed inline");
            Dispatch::Inline(processor.clone())
        }
    };

    let dispatcher = CommandDispatcher::new(
        dispatch,
        Arc::new(FileSettingsLoader::new(config_dir)),
        Arc::new(JinjaRenderer::new()),
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        processor,
        worker_token: processor_token.filter(|t| !t.is_empty()),
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "🌐 weekshare listening");

    axum::serve(listener, router(state))
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
