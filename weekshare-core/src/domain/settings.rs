// weekshare-core/src/domain/settings.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::cohort::CohortFolderTable;
use crate::domain::error::DomainError;
use crate::domain::principal::PrincipalList;
use crate::domain::retry::RetryPolicy;
use crate::domain::schedule::ScheduleTable;
use crate::domain::share::ShareRequest;

/// Operator-configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_cohort_range"))]
pub struct ShareThresholds {
    #[validate(range(min = 1))]
    pub current_cohort: u32,
    #[validate(range(min = 1))]
    pub last_week: u32,
    #[serde(default = "default_minimum_cohort")]
    #[validate(range(min = 1))]
    pub minimum_cohort: u32,
}

fn default_minimum_cohort() -> u32 {
    3
}

fn validate_cohort_range(t: &ShareThresholds) -> Result<(), ValidationError> {
    if t.minimum_cohort > t.current_cohort {
        return Err(ValidationError::new("minimum_cohort_above_current"));
    }
    Ok(())
}

impl ShareThresholds {
    pub fn is_final_week(&self, week: u32) -> bool {
        week == self.last_week
    }

    pub fn share_request(&self, week: u32) -> ShareRequest {
        ShareRequest {
            target_week: week,
            current_cohort: self.current_cohort,
            minimum_cohort: self.minimum_cohort,
            is_final_week: self.is_final_week(week),
        }
    }
}

/// Everything the processor reads from static configuration, loaded per invocation.
#[derive(Debug, Clone)]
pub struct ShareSettings {
    pub thresholds: ShareThresholds,
    /// Addresses in this domain do not get the upstream notification email.
    pub trusted_domain: String,
    pub retry: RetryPolicy,
    pub schedule: ScheduleTable,
    pub folders: CohortFolderTable,
    pub principals: PrincipalList,
}

impl ShareSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.thresholds
            .validate()
            .map_err(|e| DomainError::InvalidSettings(e.to_string()))?;
        self.retry
            .validate()
            .map_err(|e| DomainError::InvalidSettings(e.to_string()))?;
        self.schedule.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(current: u32, last: u32, minimum: u32) -> ShareThresholds {
        ShareThresholds {
            current_cohort: current,
            last_week: last,
            minimum_cohort: minimum,
        }
    }

    #[test]
    fn test_share_request_marks_final_week() {
        let t = thresholds(8, 9, 3);
        assert!(!t.share_request(8).is_final_week);
        let req = t.share_request(9);
        assert!(req.is_final_week);
        assert_eq!(req.current_cohort, 8);
        assert_eq!(req.minimum_cohort, 3);
    }

    #[test]
    fn test_validation() {
        assert!(thresholds(8, 9, 3).validate().is_ok());
        assert!(thresholds(2, 9, 3).validate().is_err());
        assert!(thresholds(0, 9, 0).validate().is_err());
    }
}
