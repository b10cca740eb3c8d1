// weekshare/src/commands/current_week.rs
//
// USE CASE: Which week does the scheduled trigger share today?

use anyhow::Context;
use std::path::Path;

use weekshare_core::infrastructure::{FileSettingsLoader, SystemClock};
use weekshare_core::ports::Clock;

pub fn execute(config_dir: &Path) -> anyhow::Result<()> {
    let settings = FileSettingsLoader::new(config_dir)
        .load_with_env(|key| std::env::var(key).ok())
        .with_context(|| format!("Failed to load settings from {:?}", config_dir))?;

    let today = SystemClock.today();
    match settings.schedule.current_week(today) {
        Some(week) => {
            let since = settings
                .schedule
                .activation_date(week)
                .map(|d| d.to_string())
                .unwrap_or_default();
            println!("📅 {}: week {} (since {})", today, week, since);
        }
        None => println!("📅 {}: outside the schedule, nothing to share", today),
    }
    Ok(())
}
