// weekshare-core/src/ports/folder_store.rs

// Upstream folder storage (Google Drive in production). The application only
// needs two operations: find a week folder, and grant read access on it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::principal::Principal;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Throttling class (rateLimitExceeded, sharingRateLimitExceeded, HTTP 429...).
    #[error("Upstream rate limit: {0}")]
    RateLimited(String),

    #[error("Principal already has access")]
    AlreadyGranted,

    #[error("Upstream error (status {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

impl StoreError {
    pub fn upstream(message: impl Into<String>) -> Self {
        StoreError::Upstream {
            status: None,
            message: message.into(),
        }
    }
}

/// Read-only grant of one folder to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest<'a> {
    pub folder_id: &'a str,
    pub principal: &'a Principal,
    pub send_notification: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionReceipt {
    pub permission_id: String,
}

#[async_trait]
pub trait FolderStore: Send + Sync {
    /// Id of the direct child folder of `parent_id` named `name`, if any.
    async fn find_child_folder(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn create_reader_permission(
        &self,
        request: PermissionRequest<'_>,
    ) -> Result<PermissionReceipt, StoreError>;

    /// Browser link for a folder id.
    fn folder_link(&self, folder_id: &str) -> String;
}
