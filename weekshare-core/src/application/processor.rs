// weekshare-core/src/application/processor.rs

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::application::granter::PermissionGranter;
use crate::application::guard::ResponseChannelGuard;
use crate::application::messages;
use crate::application::orchestrator::{ShareContext, share_week_folders};
use crate::application::ports::TemplateEngine;
use crate::domain::command::HandOff;
use crate::domain::ports::SettingsLoader;
use crate::domain::share::ShareResult;
use crate::error::WeekShareError;
use crate::ports::{ChannelTransport, Clock, FolderStore, OpsNotifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    /// Scheduled trigger outside the schedule window.
    Skipped,
    Completed {
        shared_count: usize,
        error_count: usize,
    },
    Failed {
        message: String,
    },
}

/// Runs one hand-off end to end: resolve week, share, report.
///
/// Never returns an error. Fatal failures are reported to the operations
/// channel and the response channel (both best effort) and surface as
/// `ProcessOutcome::Failed`.
pub struct ShareProcessor {
    settings: Arc<dyn SettingsLoader>,
    store: Arc<dyn FolderStore>,
    notifier: Arc<dyn OpsNotifier>,
    transport: Arc<dyn ChannelTransport>,
    renderer: Arc<dyn TemplateEngine>,
    clock: Arc<dyn Clock>,
}

impl ShareProcessor {
    pub fn new(
        settings: Arc<dyn SettingsLoader>,
        store: Arc<dyn FolderStore>,
        notifier: Arc<dyn OpsNotifier>,
        transport: Arc<dyn ChannelTransport>,
        renderer: Arc<dyn TemplateEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            store,
            notifier,
            transport,
            renderer,
            clock,
        }
    }

    #[instrument(skip(self, handoff), fields(week = ?handoff.week, user = ?handoff.user_name))]
    pub async fn process(&self, handoff: HandOff) -> ProcessOutcome {
        match self.run(&handoff).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "💥 Processing failed");
                self.report_failure(&handoff, &e.to_string()).await;
                ProcessOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn run(&self, handoff: &HandOff) -> Result<ProcessOutcome, WeekShareError> {
        let settings = self.settings.load()?;

        let week = match handoff.week {
            Some(week) => week,
            None => match settings.schedule.current_week(self.clock.today()) {
                Some(week) => week,
                None => {
                    warn!("📅 Outside the schedule window, nothing to share");
                    return Ok(ProcessOutcome::Skipped);
                }
            },
        };

        let request = settings.thresholds.share_request(week);
        let granter = PermissionGranter::new(
            self.store.as_ref(),
            settings.retry.clone(),
            settings.trusted_domain.clone(),
        );
        let ctx = ShareContext {
            store: self.store.as_ref(),
            granter: &granter,
            folders: &settings.folders,
            principals: &settings.principals,
        };

        let result = share_week_folders(&ctx, &request).await;
        log_result(&result);

        if result.outcomes.is_empty() {
            let message = messages::not_found_message(&result);
            self.reply(handoff, &message).await;
            return Ok(ProcessOutcome::Failed { message });
        }

        let summary =
            messages::summary_message(self.renderer.as_ref(), &result, request.current_cohort)?;
        self.notifier.post(&summary).await?;

        self.reply(handoff, &messages::completed_message(&result))
            .await;

        Ok(ProcessOutcome::Completed {
            shared_count: result.shared_count(),
            error_count: result.errors.len(),
        })
    }

    /// Best-effort message to the caller's response channel, if any.
    async fn reply(&self, handoff: &HandOff, message: &str) {
        let Some(url) = handoff.response_url.as_deref() else {
            return;
        };
        let guard = ResponseChannelGuard::new(self.transport.as_ref());
        if let Err(e) = guard.notify(url, message).await {
            warn!(error = %e, "⚠️  Response channel not notified");
        }
    }

    async fn report_failure(&self, handoff: &HandOff, error: &str) {
        let event = serde_json::to_string(handoff).unwrap_or_default();
        match messages::ops_error_message(self.renderer.as_ref(), error, &[("event", event)]) {
            Ok(text) => {
                if let Err(e) = self.notifier.post(&text).await {
                    warn!(error = %e, "⚠️  Operations channel not notified");
                }
            }
            Err(e) => warn!(error = %e, "⚠️  Error message could not be rendered"),
        }
        self.reply(handoff, &messages::failure_message(error)).await;
    }
}

fn log_result(result: &ShareResult) {
    match serde_json::to_string(result) {
        Ok(json) => info!(
            shared = result.shared_count(),
            errors = result.errors.len(),
            result = %json,
            "📊 Share run finished"
        ),
        Err(_) => info!(
            shared = result.shared_count(),
            errors = result.errors.len(),
            "📊 Share run finished"
        ),
    }
}
