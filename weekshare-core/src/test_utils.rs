// weekshare-core/src/test_utils.rs
//
// In-memory adapters for the ports, shared by the unit tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::channel::ValidatedChannelUrl;
use crate::domain::command::HandOff;
use crate::domain::error::DomainError;
use crate::domain::ports::SettingsLoader;
use crate::domain::principal::{Principal, PrincipalList};
use crate::domain::retry::RetryPolicy;
use crate::domain::schedule::ScheduleTable;
use crate::domain::settings::{ShareSettings, ShareThresholds};
use crate::ports::{
    ChannelTransport, Clock, FolderStore, HandoffError, NotifyError, OpsNotifier,
    PermissionReceipt, PermissionRequest, StoreError, TaskInvoker, TransportResponse,
};

#[derive(Default)]
pub struct InMemoryFolderStore {
    folders: Mutex<HashMap<(String, String), String>>,
    failures: Mutex<HashMap<String, StoreError>>,
    failing_parents: Mutex<HashSet<String>>,
    grants: Mutex<Vec<(String, String, bool)>>,
}

impl InMemoryFolderStore {
    pub fn add_folder(&self, parent_id: &str, name: &str, id: &str) {
        self.folders
            .lock()
            .unwrap()
            .insert((parent_id.to_string(), name.to_string()), id.to_string());
    }

    /// Every grant for `email` fails with `error`.
    pub fn fail_for(&self, email: &str, error: StoreError) {
        self.failures
            .lock()
            .unwrap()
            .insert(email.to_string(), error);
    }

    pub fn fail_lookup_under(&self, parent_id: &str) {
        self.failing_parents
            .lock()
            .unwrap()
            .insert(parent_id.to_string());
    }

    /// (folder_id, email, send_notification) of each successful grant.
    pub fn grants(&self) -> Vec<(String, String, bool)> {
        self.grants.lock().unwrap().clone()
    }
}

#[async_trait]
impl FolderStore for InMemoryFolderStore {
    async fn find_child_folder(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        if self.failing_parents.lock().unwrap().contains(parent_id) {
            return Err(StoreError::Upstream {
                status: Some(500),
                message: "backendError".into(),
            });
        }
        Ok(self
            .folders
            .lock()
            .unwrap()
            .get(&(parent_id.to_string(), name.to_string()))
            .cloned())
    }

    async fn create_reader_permission(
        &self,
        request: PermissionRequest<'_>,
    ) -> Result<PermissionReceipt, StoreError> {
        if let Some(err) = self.failures.lock().unwrap().get(request.principal.email()) {
            return Err(err.clone());
        }
        let mut grants = self.grants.lock().unwrap();
        grants.push((
            request.folder_id.to_string(),
            request.principal.email().to_string(),
            request.send_notification,
        ));
        Ok(PermissionReceipt {
            permission_id: format!("perm-{}", grants.len()),
        })
    }

    fn folder_link(&self, folder_id: &str) -> String {
        format!("https://drive.test/{}", folder_id)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl OpsNotifier for RecordingNotifier {
    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Delivery("channel_not_found".into()));
        }
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct RecordingTransport {
    pub status: u16,
    pub sent: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingTransport {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body["text"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::with_status(200)
    }
}

#[async_trait]
impl ChannelTransport for RecordingTransport {
    async fn post_json(
        &self,
        url: &ValidatedChannelUrl,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((url.as_str().to_string(), body.clone()));
        Ok(TransportResponse {
            status: self.status,
            body: if self.status == 200 { "ok".into() } else { "no_service".into() },
        })
    }
}

#[derive(Default)]
pub struct RecordingInvoker {
    pub submitted: Mutex<Vec<HandOff>>,
    pub fail: bool,
}

#[async_trait]
impl TaskInvoker for RecordingInvoker {
    async fn submit(&self, handoff: &HandOff) -> Result<(), HandoffError> {
        if self.fail {
            return Err(HandoffError::Submit("connection refused".into()));
        }
        self.submitted.lock().unwrap().push(handoff.clone());
        Ok(())
    }

    fn target(&self) -> &str {
        "memory"
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct StaticSettings(pub Option<ShareSettings>);

impl SettingsLoader for StaticSettings {
    fn load(&self) -> Result<ShareSettings, DomainError> {
        self.0
            .clone()
            .ok_or_else(|| DomainError::SettingsLoad("folders.yml: No such file".into()))
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Cohorts 3-5 (current 5, last week 9), two principals, weeks 1-9 weekly from 2024-01-01.
pub fn sample_settings() -> ShareSettings {
    let schedule = ScheduleTable::new(
        (1..=9)
            .map(|w| (w, date("2024-01-01") + chrono::Duration::weeks(i64::from(w) - 1)))
            .collect::<BTreeMap<_, _>>(),
    );
    ShareSettings {
        thresholds: ShareThresholds {
            current_cohort: 5,
            last_week: 9,
            minimum_cohort: 3,
        },
        trusted_domain: "gmail.com".into(),
        retry: RetryPolicy::default(),
        schedule,
        folders: ["3기", "4기", "5기"]
            .iter()
            .map(|l| (l.to_string(), format!("root-{}", l)))
            .collect(),
        principals: PrincipalList::new(vec![
            Principal::new("a@gmail.com"),
            Principal::new("b@gmail.com"),
        ]),
    }
}
