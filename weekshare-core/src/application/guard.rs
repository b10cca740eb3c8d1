// weekshare-core/src/application/guard.rs

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::channel::{ChannelRejection, validate_channel_url};
use crate::ports::channel::ChannelTransport;
use crate::ports::notifier::NotifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// Nothing was sent.
    #[error("Delivery rejected: {0}")]
    Rejected(#[from] ChannelRejection),

    #[error("Response channel answered {status}: {body}")]
    Failed { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] NotifyError),
}

/// Sends status messages to caller supplied callback URLs, failing closed.
///
/// The URL must pass the allow-list before any byte leaves the process.
/// One attempt per message, no retry.
pub struct ResponseChannelGuard<'a> {
    transport: &'a dyn ChannelTransport,
}

impl<'a> ResponseChannelGuard<'a> {
    pub fn new(transport: &'a dyn ChannelTransport) -> Self {
        Self { transport }
    }

    #[instrument(skip(self, channel_url, message), fields(message.len = message.len()))]
    pub async fn notify(
        &self,
        channel_url: &str,
        message: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let url = match validate_channel_url(channel_url) {
            Ok(url) => url,
            Err(rejection) => {
                warn!(%rejection, "🛡️  response_url rejected, nothing sent");
                return Err(DeliveryError::Rejected(rejection));
            }
        };

        let payload = serde_json::json!({
            "response_type": "ephemeral",
            "text": message,
        });

        let response = self.transport.post_json(&url, &payload).await?;
        if !(200..300).contains(&response.status) {
            return Err(DeliveryError::Failed {
                status: response.status,
                body: response.body,
            });
        }

        info!(status = response.status, "📨 Response channel notified");
        Ok(DeliveryReceipt {
            status: response.status,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingTransport;
    use anyhow::Result;

    const GOOD: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

    #[tokio::test]
    async fn test_delivers_to_valid_url() -> Result<()> {
        let transport = RecordingTransport::default();
        let guard = ResponseChannelGuard::new(&transport);

        let receipt = guard.notify(GOOD, "done").await?;
        assert_eq!(receipt.status, 200);

        let sent = transport.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, GOOD);
        assert_eq!(
            sent[0].1,
            serde_json::json!({"response_type": "ephemeral", "text": "done"})
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_urls_are_never_sent() {
        let transport = RecordingTransport::default();
        let guard = ResponseChannelGuard::new(&transport);
        let long = format!("https://hooks.slack.com/services/{}", "a".repeat(2967));

        for url in [
            "http://hooks.slack.com/services/T000/B000/XXXX",
            "https://evil.com/services/T000/B000/XXXX",
            "https://hooks.slack.com:8443/services/T000/B000/XXXX",
            "https://hooks.slack.com/other/T000/B000/XXXX",
            long.as_str(),
            "",
        ] {
            let res = guard.notify(url, "hi").await;
            assert!(matches!(res, Err(DeliveryError::Rejected(_))), "{}", url);
        }
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_2xx_is_a_failure() {
        let transport = RecordingTransport::with_status(302);
        let guard = ResponseChannelGuard::new(&transport);

        let res = guard.notify(GOOD, "done").await;
        assert!(matches!(res, Err(DeliveryError::Failed { status: 302, .. })));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }
}
