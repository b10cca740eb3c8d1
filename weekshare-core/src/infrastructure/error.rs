// weekshare-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error on '{path}': {source}")]
    #[diagnostic(
        code(weekshare::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in '{path}': {source}")]
    #[diagnostic(
        code(weekshare::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(weekshare::infra::config))]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(weekshare::infra::config_missing))]
    ConfigNotFound(String),

    // --- HTTP CLIENTS (Drive, Slack, processor) ---
    #[error("HTTP client Error: {0}")]
    #[diagnostic(code(weekshare::infra::http))]
    Http(#[from] reqwest::Error),

    #[error("Google auth Error: {0}")]
    #[diagnostic(
        code(weekshare::infra::gcp_auth),
        help("Set GOOGLE_CREDENTIALS (service account JSON) or GOOGLE_APPLICATION_CREDENTIALS.")
    )]
    Auth(#[from] gcp_auth::Error),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(weekshare::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the message template.")
    )]
    TemplateError(#[from] minijinja::Error),
}

impl InfrastructureError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        InfrastructureError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
