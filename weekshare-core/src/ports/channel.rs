// weekshare-core/src/ports/channel.rs

use async_trait::async_trait;

use crate::domain::channel::ValidatedChannelUrl;
use crate::ports::notifier::NotifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Raw delivery to an already validated callback URL.
///
/// Implementations must not follow redirects.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &ValidatedChannelUrl,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, NotifyError>;
}
