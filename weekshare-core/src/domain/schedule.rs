// weekshare-core/src/domain/schedule.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Week index -> activation date.
///
/// Week W is current from its activation date until the next week's date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleTable {
    weeks: BTreeMap<u32, NaiveDate>,
}

impl ScheduleTable {
    pub fn new(weeks: BTreeMap<u32, NaiveDate>) -> Self {
        Self { weeks }
    }

    /// Builds a table from `(week, "YYYY-MM-DD")` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (u32, &'a str)>,
    {
        let mut weeks = BTreeMap::new();
        for (week, date) in pairs {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                DomainError::ScheduleError(format!("week {}: invalid date '{}': {}", week, date, e))
            })?;
            weeks.insert(week, parsed);
        }
        Ok(Self { weeks })
    }

    /// Greatest week whose activation date is on or before `today`.
    ///
    /// `None` means the program has not started yet: callers skip, they do not fail.
    pub fn current_week(&self, today: NaiveDate) -> Option<u32> {
        self.weeks
            .iter()
            .filter(|(_, activation)| **activation <= today)
            .map(|(week, _)| *week)
            .max()
    }

    pub fn activation_date(&self, week: u32) -> Option<NaiveDate> {
        self.weeks.get(&week).copied()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.weeks.contains_key(&0) {
            return Err(DomainError::ScheduleError(
                "week indexes start at 1".to_string(),
            ));
        }
        Ok(())
    }
}
