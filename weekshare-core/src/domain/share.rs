// weekshare-core/src/domain/share.rs

use serde::{Deserialize, Serialize};

use crate::domain::cohort::{Cohort, CohortFolderTable};

/// What to share for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub target_week: u32,
    pub current_cohort: u32,
    pub minimum_cohort: u32,
    pub is_final_week: bool,
}

/// A cohort whose week folder was resolved (and granted to the principals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOutcome {
    pub cohort: String,
    pub resolved_week: u32,
    pub folder_id: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareError {
    pub cohort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResult {
    pub week: u32,
    pub outcomes: Vec<ShareOutcome>,
    pub errors: Vec<ShareError>,
}

impl ShareResult {
    pub fn new(week: u32) -> Self {
        Self {
            week,
            ..Self::default()
        }
    }

    pub fn shared_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A cohort selected for sharing, before any upstream lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTarget {
    pub cohort: Cohort,
    pub resolved_week: u32,
    pub root_folder_id: String,
}

/// Cohort/week selection.
///
/// - cohorts below `minimum_cohort` or above `current_cohort` are excluded;
/// - on the final week only the current cohort is shared;
/// - the current cohort resolves `target_week`, older cohorts run one week ahead.
///
/// Labels that are not `<N>기` come back as errors, they never abort the plan.
pub fn plan_targets(
    folders: &CohortFolderTable,
    request: &ShareRequest,
) -> (Vec<PlannedTarget>, Vec<ShareError>) {
    let mut targets = Vec::new();
    let mut errors = Vec::new();

    for (label, root_folder_id) in folders {
        let cohort = match Cohort::parse(label) {
            Ok(c) => c,
            Err(e) => {
                errors.push(ShareError {
                    cohort: label.clone(),
                    email: None,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if cohort.number < request.minimum_cohort || cohort.number > request.current_cohort {
            continue;
        }

        let is_current = cohort.number == request.current_cohort;
        if request.is_final_week && !is_current {
            continue;
        }

        let resolved_week = if is_current {
            request.target_week
        } else {
            match request.target_week.checked_add(1) {
                Some(week) => week,
                None => {
                    errors.push(ShareError {
                        cohort: cohort.label.clone(),
                        email: None,
                        message: format!("Week {} has no following week", request.target_week),
                    });
                    continue;
                }
            }
        };

        targets.push(PlannedTarget {
            cohort,
            resolved_week,
            root_folder_id: root_folder_id.clone(),
        });
    }

    targets.sort_by_key(|t| t.cohort.number);
    (targets, errors)
}
