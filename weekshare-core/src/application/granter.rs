// weekshare-core/src/application/granter.rs

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::principal::Principal;
use crate::domain::retry::RetryPolicy;
use crate::ports::folder_store::{FolderStore, PermissionRequest, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantReceipt {
    pub permission_id: Option<String>,
    pub attempts: u32,
    pub already_granted: bool,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrantError {
    #[error("Rate limit retries exhausted for {principal} after {attempts} attempts")]
    RateLimited { principal: String, attempts: u32 },

    #[error("Grant failed for {principal}: {source}")]
    Upstream {
        principal: String,
        #[source]
        source: StoreError,
    },
}

/// Grants read access on a folder, one principal at a time.
///
/// Rate-limit errors are retried with the policy's backoff; everything else
/// propagates immediately. "Already granted" counts as success.
pub struct PermissionGranter<'a> {
    store: &'a dyn FolderStore,
    policy: RetryPolicy,
    trusted_domain: String,
}

impl<'a> PermissionGranter<'a> {
    pub fn new(store: &'a dyn FolderStore, policy: RetryPolicy, trusted_domain: impl Into<String>) -> Self {
        Self {
            store,
            policy,
            trusted_domain: trusted_domain.into(),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Trusted-domain accounts already watch the shared workspace; others get the email.
    pub fn sends_notification(&self, principal: &Principal) -> bool {
        !principal.domain_is(&self.trusted_domain)
    }

    #[instrument(skip(self, principal), fields(principal = %principal))]
    pub async fn grant(
        &self,
        folder_id: &str,
        principal: &Principal,
        max_attempts: u32,
    ) -> Result<GrantReceipt, GrantError> {
        let max_attempts = max_attempts.max(1);
        let send_notification = self.sends_notification(principal);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = PermissionRequest {
                folder_id,
                principal,
                send_notification,
            };

            match self.store.create_reader_permission(request).await {
                Ok(receipt) => {
                    tokio::time::sleep(self.policy.throttle_floor()).await;
                    return Ok(GrantReceipt {
                        permission_id: Some(receipt.permission_id),
                        attempts: attempt,
                        already_granted: false,
                    });
                }
                Err(StoreError::AlreadyGranted) => {
                    debug!("already has access");
                    return Ok(GrantReceipt {
                        permission_id: None,
                        attempts: attempt,
                        already_granted: true,
                    });
                }
                Err(StoreError::RateLimited(reason)) => {
                    if attempt >= max_attempts {
                        return Err(GrantError::RateLimited {
                            principal: principal.to_string(),
                            attempts: attempt,
                        });
                    }
                    let wait = self.policy.delay_for(attempt);
                    warn!(attempt, ?wait, %reason, "⏳ Rate limited, backing off");
                    tokio::time::sleep(wait).await;
                }
                Err(other) => {
                    return Err(GrantError::Upstream {
                        principal: principal.to_string(),
                        source: other,
                    });
                }
            }
        }
    }
}
