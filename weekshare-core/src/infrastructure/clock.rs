// weekshare-core/src/infrastructure/clock.rs

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::ports::clock::Clock;

/// Korea Standard Time has no daylight saving, a fixed offset is enough.
pub const KST_OFFSET_HOURS: i64 = 9;

pub struct SystemClock;

impl SystemClock {
    pub fn date_at(now: DateTime<Utc>) -> NaiveDate {
        (now + Duration::hours(KST_OFFSET_HOURS)).date_naive()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Self::date_at(Utc::now())
    }
}
