// weekshare-core/src/application/dispatcher.rs

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::application::messages;
use crate::application::ports::TemplateEngine;
use crate::application::processor::ShareProcessor;
use crate::domain::command::{Acknowledgment, HandOff, SlashCommand, parse_week};
use crate::domain::ports::SettingsLoader;
use crate::ports::invoker::{HandoffError, TaskInvoker};

/// Slack expects the slash command answer within 3 s.
pub const ACK_BUDGET: Duration = Duration::from_secs(2);

/// Where accepted commands go.
pub enum Dispatch {
    /// Fire-and-forget submission to the worker.
    Remote(Arc<dyn TaskInvoker>),
    /// No worker configured: process before answering.
    Inline(Arc<ShareProcessor>),
}

/// Front door of the `/share` slash command.
pub struct CommandDispatcher {
    dispatch: Dispatch,
    settings: Arc<dyn SettingsLoader>,
    renderer: Arc<dyn TemplateEngine>,
}

impl CommandDispatcher {
    pub fn new(
        dispatch: Dispatch,
        settings: Arc<dyn SettingsLoader>,
        renderer: Arc<dyn TemplateEngine>,
    ) -> Self {
        Self {
            dispatch,
            settings,
            renderer,
        }
    }

    /// Always answers; failures become an ephemeral error text.
    #[instrument(skip_all)]
    pub async fn handle(&self, body: &str) -> Acknowledgment {
        let command = SlashCommand::from_form(body);

        let week = match parse_week(&command.text) {
            Ok(week) => week,
            Err(e) => {
                info!(text = %command.text, reason = %e, "Usage reply");
                return Acknowledgment::usage();
            }
        };

        info!(
            week,
            user = %command.user_name,
            channel = %command.channel_id,
            "📥 Share command received"
        );

        let handoff = HandOff::for_command(week, &command);
        if let Err(e) = self.hand_off(&handoff).await {
            error!(error = %e, "❌ Hand-off failed");
            return Acknowledgment::ephemeral(messages::error_ack(&e.to_string()));
        }

        Acknowledgment::ephemeral(self.ack_text(week))
    }

    async fn hand_off(&self, handoff: &HandOff) -> Result<(), HandoffError> {
        match &self.dispatch {
            Dispatch::Remote(invoker) => {
                match tokio::time::timeout(ACK_BUDGET, invoker.submit(handoff)).await {
                    Ok(res) => res,
                    Err(_) => Err(HandoffError::Timeout(ACK_BUDGET)),
                }
            }
            Dispatch::Inline(processor) => {
                let outcome = processor.process(handoff.clone()).await;
                info!(?outcome, "Inline processing done");
                Ok(())
            }
        }
    }

    fn ack_text(&self, week: u32) -> String {
        let thresholds = match self.settings.load() {
            Ok(settings) => settings.thresholds,
            Err(e) => {
                warn!(error = %e, "Settings unavailable, generic acknowledgment");
                return messages::processing_fallback_ack(week);
            }
        };
        messages::processing_ack(self.renderer.as_ref(), &thresholds, week)
            .unwrap_or_else(|_| messages::processing_fallback_ack(week))
    }
}
