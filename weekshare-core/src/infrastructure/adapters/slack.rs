// weekshare-core/src/infrastructure/adapters/slack.rs

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::channel::ValidatedChannelUrl;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::channel::{ChannelTransport, TransportResponse};
use crate::ports::notifier::{NotifyError, OpsNotifier};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Response channel delivery budget.
pub const CHANNEL_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts to the operations channel through `chat.postMessage`.
pub struct SlackNotifier {
    client: reqwest::Client,
    token: Option<String>,
    channel: Option<String>,
    endpoint: String,
}

impl SlackNotifier {
    /// Missing token or channel is tolerated here and reported on `post`.
    pub fn new(
        token: Option<String>,
        channel: Option<String>,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(CHANNEL_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, token, channel, POST_MESSAGE_URL))
    }

    pub fn with_client(
        client: reqwest::Client,
        token: Option<String>,
        channel: Option<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token: token.filter(|t| !t.is_empty()),
            channel: channel.filter(|c| !c.is_empty()),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// `chat.postMessage` answers 200 even on failure, `ok` carries the verdict.
fn check_api_response(body: &str) -> Result<(), NotifyError> {
    let parsed: SlackApiResponse = serde_json::from_str(body)
        .map_err(|e| NotifyError::Delivery(format!("unexpected Slack answer: {e}")))?;
    if parsed.ok {
        Ok(())
    } else {
        Err(NotifyError::Delivery(
            parsed.error.unwrap_or_else(|| "unknown_error".to_string()),
        ))
    }
}

#[async_trait]
impl OpsNotifier for SlackNotifier {
    #[instrument(skip(self, text), fields(text.len = text.len()))]
    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| NotifyError::NotConfigured("SLACK_BOT_TOKEN".into()))?;
        let channel = self
            .channel
            .as_deref()
            .ok_or_else(|| NotifyError::NotConfigured("SLACK_CHANNEL_ID".into()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&serde_json::json!({
                "channel": channel,
                "text": text,
                "mrkdwn": true,
            }))
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;
        check_api_response(&body)?;

        info!("💬 Operations channel message posted");
        Ok(())
    }
}

/// HTTP transport for response URLs. Redirects are never followed.
pub struct ReqwestChannelTransport {
    client: reqwest::Client,
}

impl ReqwestChannelTransport {
    pub fn new() -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(CHANNEL_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChannelTransport for ReqwestChannelTransport {
    async fn post_json(
        &self,
        url: &ValidatedChannelUrl,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, NotifyError> {
        let response = self
            .client
            .post(url.as_url().clone())
            .json(body)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{StatusCode, header};
    use axum::routing::post;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    #[test]
    fn test_api_response_verdict() {
        assert!(check_api_response(r#"{"ok":true,"ts":"1.2"}"#).is_ok());
        assert_eq!(
            check_api_response(r#"{"ok":false,"error":"channel_not_found"}"#),
            Err(NotifyError::Delivery("channel_not_found".into()))
        );
        assert!(check_api_response("<html>").is_err());
    }

    #[tokio::test]
    async fn test_missing_token_is_reported() -> anyhow::Result<()> {
        let notifier = SlackNotifier::new(Some(String::new()), Some("C123".into()))?;
        assert_eq!(
            notifier.post("hello").await,
            Err(NotifyError::NotConfigured("SLACK_BOT_TOKEN".into()))
        );
        Ok(())
    }

    async fn spawn(app: Router) -> anyhow::Result<std::net::SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move { axum::serve(listener, app).await });
        Ok(addr)
    }

    #[tokio::test]
    async fn test_transport_does_not_follow_redirects() -> anyhow::Result<()> {
        let landed = Arc::new(AtomicUsize::new(0));
        let counter = landed.clone();
        let target = Router::new().route(
            "/landing",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    "reached"
                }
            }),
        );
        let target_addr = spawn(target).await?;

        // Another host: `localhost` instead of the loopback IP.
        let location = format!("http://localhost:{}/landing", target_addr.port());
        let redirector = Router::new().route(
            "/services/T000/B000/XXXX",
            post(move || {
                let location = location.clone();
                async move { (StatusCode::FOUND, [(header::LOCATION, location)]) }
            }),
        );
        let redirector_addr = spawn(redirector).await?;

        let url = url::Url::parse(&format!(
            "http://{}/services/T000/B000/XXXX",
            redirector_addr
        ))?;
        let transport = ReqwestChannelTransport::new()?;
        let response = transport
            .post_json(
                &ValidatedChannelUrl::unchecked(url),
                &serde_json::json!({"response_type": "ephemeral", "text": "done"}),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 302);
        assert_eq!(landed.load(Ordering::SeqCst), 0);
        Ok(())
    }
}
