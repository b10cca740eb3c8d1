// weekshare-core/src/infrastructure/adapters/drive.rs

// Google Drive v3 over plain HTTPS. Tokens come from gcp_auth, either an
// inline service account (GOOGLE_CREDENTIALS) or the ambient provider.

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::infrastructure::error::InfrastructureError;
use crate::ports::folder_store::{FolderStore, PermissionReceipt, PermissionRequest, StoreError};

const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

const RATE_LIMIT_REASONS: [&str; 3] = [
    "rateLimitExceeded",
    "sharingRateLimitExceeded",
    "userRateLimitExceeded",
];

pub struct GoogleDriveStore {
    token_provider: Arc<dyn TokenProvider>,
    client: reqwest::Client,
    api_base: String,
}

impl std::fmt::Debug for GoogleDriveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDriveStore")
            .field("token_provider", &"<TokenProvider>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GoogleDriveStore {
    /// Uses the service account JSON when given, ambient credentials otherwise.
    pub async fn connect(credentials_json: Option<&str>) -> Result<Self, InfrastructureError> {
        let token_provider: Arc<dyn TokenProvider> = match credentials_json {
            Some(json) => {
                info!("🔑 Using service account from GOOGLE_CREDENTIALS");
                Arc::new(CustomServiceAccount::from_json(json)?)
            }
            None => gcp_auth::provider().await?,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::with_client(token_provider, client, DRIVE_API))
    }

    pub fn with_client(
        token_provider: Arc<dyn TokenProvider>,
        client: reqwest::Client,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            token_provider,
            client,
            api_base: api_base.into(),
        }
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let token = self
            .token_provider
            .token(&[DRIVE_SCOPE])
            .await
            .map_err(|e| StoreError::upstream(format!("Failed to get GCP access token: {e}")))?;
        Ok(token.as_str().to_string())
    }

    async fn error_from(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        classify_error(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PermissionResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorItem {
    #[serde(default)]
    reason: String,
}

/// Maps a non-2xx Drive answer onto the store error classes.
pub fn classify_error(status: u16, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .map(|r| r.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    let rate_limited = status == 429
        || parsed.as_ref().is_some_and(|r| {
            r.error
                .errors
                .iter()
                .any(|item| RATE_LIMIT_REASONS.contains(&item.reason.as_str()))
        });
    if rate_limited {
        return StoreError::RateLimited(message);
    }

    if message.to_lowercase().contains("already has access") {
        return StoreError::AlreadyGranted;
    }

    StoreError::Upstream {
        status: Some(status),
        message,
    }
}

/// Drive query literal: backslashes and single quotes are escaped.
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn child_folder_query(parent_id: &str, name: &str) -> String {
    format!(
        "'{}' in parents and name = '{}' and mimeType = '{}' and trashed = false",
        escape_query_value(parent_id),
        escape_query_value(name),
        FOLDER_MIME_TYPE
    )
}

#[async_trait]
impl FolderStore for GoogleDriveStore {
    #[instrument(skip(self))]
    async fn find_child_folder(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        let token = self.access_token().await?;
        let query = child_folder_query(parent_id, name);

        let response = self
            .client
            .get(format!("{}/files", self.api_base))
            .bearer_auth(&token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::upstream(format!("Drive files.list failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let list: FileList = response
            .json()
            .await
            .map_err(|e| StoreError::upstream(format!("Drive files.list decode failed: {e}")))?;
        debug!(matches = list.files.len(), "Drive lookup done");

        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    #[instrument(skip(self, request), fields(folder_id = request.folder_id, principal = %request.principal))]
    async fn create_reader_permission(
        &self,
        request: PermissionRequest<'_>,
    ) -> Result<PermissionReceipt, StoreError> {
        let token = self.access_token().await?;
        let body = serde_json::json!({
            "type": "user",
            "role": "reader",
            "emailAddress": request.principal.email(),
        });
        let notify = if request.send_notification { "true" } else { "false" };

        let response = self
            .client
            .post(format!("{}/files/{}/permissions", self.api_base, request.folder_id))
            .bearer_auth(&token)
            .query(&[
                ("sendNotificationEmail", notify),
                ("supportsAllDrives", "true"),
            ])
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::upstream(format!("Drive permissions.create failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let created: PermissionResponse = response.json().await.map_err(|e| {
            StoreError::upstream(format!("Drive permissions.create decode failed: {e}"))
        })?;
        Ok(PermissionReceipt {
            permission_id: created.id,
        })
    }

    fn folder_link(&self, folder_id: &str) -> String {
        format!("https://drive.google.com/drive/folders/{}", folder_id)
    }
}
