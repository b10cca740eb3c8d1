// weekshare-core/src/domain/cohort.rs

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::domain::error::DomainError;

// Literal pattern, covered by the parse tests.
#[allow(clippy::expect_used)]
static RE_COHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*기\s*$").expect("valid cohort pattern"));

/// A cohort label such as "8기", parsed into its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    pub label: String,
    pub number: u32,
}

impl Cohort {
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let number = RE_COHORT
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(|| DomainError::InvalidCohortLabel(label.to_string()))?;

        Ok(Self {
            label: label.to_string(),
            number,
        })
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Canonical folder name of a week inside a cohort root ("3주차").
pub fn week_label(week: u32) -> String {
    format!("{}주차", week)
}

/// Cohort label -> root folder id in the upstream store.
pub type CohortFolderTable = BTreeMap<String, String>;
