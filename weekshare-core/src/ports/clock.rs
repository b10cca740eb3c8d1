// weekshare-core/src/ports/clock.rs

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// Calendar date in the schedule's time zone.
    fn today(&self) -> NaiveDate;
}
