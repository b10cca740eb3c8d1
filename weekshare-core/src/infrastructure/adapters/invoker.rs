// weekshare-core/src/infrastructure/adapters/invoker.rs

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::command::HandOff;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::invoker::{HandoffError, TaskInvoker};

/// Header carrying the shared secret between front door and worker.
pub const TOKEN_HEADER: &str = "x-weekshare-token";

/// Submits hand-offs to the worker endpoint (`POST /tasks/share`).
///
/// The worker acknowledges with 202 before processing, so the call returns
/// as soon as the payload is accepted.
pub struct HttpTaskInvoker {
    client: reqwest::Client,
    target: String,
    token: Option<String>,
}

impl HttpTaskInvoker {
    pub fn new(
        target: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let target = target.into();
        url::Url::parse(&target)
            .map_err(|e| InfrastructureError::ConfigError(format!("processor url '{target}': {e}")))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            target,
            token: token.filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait]
impl TaskInvoker for HttpTaskInvoker {
    #[instrument(skip(self), fields(target = %self.target))]
    async fn submit(&self, handoff: &HandOff) -> Result<(), HandoffError> {
        let mut request = self.client.post(&self.target).json(handoff);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                HandoffError::Submit(format!("timed out: {e}"))
            } else {
                HandoffError::Submit(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HandoffError::Submit(format!("worker answered {status}")));
        }

        info!(week = ?handoff.week, "🚀 Hand-off submitted");
        Ok(())
    }

    fn target(&self) -> &str {
        &self.target
    }
}
