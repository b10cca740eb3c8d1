// weekshare-core/src/domain/channel.rs
//
// Allow-list policy for caller supplied callback URLs (anti-SSRF).

use thiserror::Error;
use url::Url;

pub const MAX_CHANNEL_URL_LEN: usize = 2048;
pub const ALLOWED_HOST: &str = "hooks.slack.com";
pub const REQUIRED_PATH_PREFIX: &str = "/services/";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelRejection {
    #[error("response_url is missing")]
    Missing,
    #[error("response_url is too long ({0} bytes)")]
    TooLong(usize),
    #[error("response_url is not a valid URL: {0}")]
    Malformed(String),
    #[error("only https response_url is allowed (got '{0}')")]
    Scheme(String),
    #[error("response_url must not carry credentials")]
    Credentials,
    #[error("response_url host '{0}' is not allowed")]
    Host(String),
    #[error("response_url port {0} is not allowed")]
    Port(u16),
    #[error("response_url path '{0}' is not allowed")]
    Path(String),
}

/// A URL that passed [`validate_channel_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChannelUrl(Url);

impl ValidatedChannelUrl {
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Skips the allow-list, for transport tests against a local listener.
    #[cfg(test)]
    pub(crate) fn unchecked(url: Url) -> Self {
        Self(url)
    }
}

pub fn validate_channel_url(raw: &str) -> Result<ValidatedChannelUrl, ChannelRejection> {
    if raw.is_empty() {
        return Err(ChannelRejection::Missing);
    }
    // Length first: never hand an unbounded string to the parser.
    if raw.len() > MAX_CHANNEL_URL_LEN {
        return Err(ChannelRejection::TooLong(raw.len()));
    }

    let url = Url::parse(raw).map_err(|e| ChannelRejection::Malformed(e.to_string()))?;

    if url.scheme() != "https" {
        return Err(ChannelRejection::Scheme(url.scheme().to_string()));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ChannelRejection::Credentials);
    }

    let host = url
        .host_str()
        .ok_or_else(|| ChannelRejection::Host(String::new()))?;
    if !host.eq_ignore_ascii_case(ALLOWED_HOST) {
        return Err(ChannelRejection::Host(host.to_string()));
    }

    // `Url::port` is None for an explicit default port too.
    if let Some(port) = url.port()
        && port != 443
    {
        return Err(ChannelRejection::Port(port));
    }

    if !url.path().starts_with(REQUIRED_PATH_PREFIX) {
        return Err(ChannelRejection::Path(url.path().to_string()));
    }

    Ok(ValidatedChannelUrl(url))
}
