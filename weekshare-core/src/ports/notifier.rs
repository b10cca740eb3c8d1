// weekshare-core/src/ports/notifier.rs

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notifier is not configured: {0}")]
    NotConfigured(String),
    #[error("Message delivery failed: {0}")]
    Delivery(String),
}

/// Operations channel (Slack chat.postMessage in production).
#[async_trait]
pub trait OpsNotifier: Send + Sync {
    async fn post(&self, text: &str) -> Result<(), NotifyError>;
}
