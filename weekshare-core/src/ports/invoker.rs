// weekshare-core/src/ports/invoker.rs

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::domain::command::HandOff;

#[derive(Debug, Error, Diagnostic)]
pub enum HandoffError {
    #[error("Hand-off submission failed: {0}")]
    #[diagnostic(code(weekshare::handoff::submit))]
    Submit(String),

    #[error("Hand-off submission timed out after {0:?}")]
    #[diagnostic(code(weekshare::handoff::timeout))]
    Timeout(std::time::Duration),
}

/// One-way submission of work to the processing unit.
///
/// Delivery is at-least-once: the processor must tolerate duplicates.
#[async_trait]
pub trait TaskInvoker: Send + Sync {
    async fn submit(&self, handoff: &HandOff) -> Result<(), HandoffError>;

    fn target(&self) -> &str;
}
