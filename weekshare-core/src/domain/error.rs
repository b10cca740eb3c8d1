// weekshare-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("No '{week_label}' folder under cohort '{cohort}'")]
    #[diagnostic(
        code(weekshare::domain::folder_not_found),
        help("Create the week folder in the cohort root or fix folders.yml.")
    )]
    FolderNotFound { cohort: String, week_label: String },

    #[error("Cohort label '{0}' does not match the '<N>기' format")]
    #[diagnostic(code(weekshare::domain::cohort_label))]
    InvalidCohortLabel(String),

    #[error("Invalid share settings: {0}")]
    #[diagnostic(
        code(weekshare::domain::settings),
        help("Check current_cohort / last_week / minimum_cohort in weekshare.yaml.")
    )]
    InvalidSettings(String),

    #[error("Settings could not be loaded: {0}")]
    #[diagnostic(code(weekshare::domain::settings_load))]
    SettingsLoad(String),

    #[error("Schedule Error: {0}")]
    #[diagnostic(code(weekshare::domain::schedule))]
    ScheduleError(String),
}
