// weekshare/src/commands/plan.rs
//
// USE CASE: Dry run of the folder resolution, no Drive call.

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::Path;

use weekshare_core::domain::cohort::week_label;
use weekshare_core::domain::share::plan_targets;
use weekshare_core::infrastructure::FileSettingsLoader;

pub fn execute(config_dir: &Path, week: u32) -> anyhow::Result<()> {
    let settings = FileSettingsLoader::new(config_dir)
        .load_with_env(|key| std::env::var(key).ok())
        .with_context(|| format!("Failed to load settings from {:?}", config_dir))?;

    let request = settings.thresholds.share_request(week);
    let (targets, errors) = plan_targets(&settings.folders, &request);

    println!(
        "🗺️  Week {} plan (current cohort {}, minimum {}{})",
        week,
        request.current_cohort,
        request.minimum_cohort,
        if request.is_final_week { ", final week" } else { "" }
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Cohort", "Week", "Folder", "Root folder id"]);
    for target in &targets {
        table.add_row(vec![
            target.cohort.label.clone(),
            target.resolved_week.to_string(),
            week_label(target.resolved_week),
            target.root_folder_id.clone(),
        ]);
    }
    println!("{table}");

    for err in &errors {
        eprintln!("   ⚠️  {}: {}", err.cohort, err.message);
    }
    println!(
        "   {} cohort(s) x {} principal(s)",
        targets.len(),
        settings.principals.len()
    );
    Ok(())
}
