// weekshare-core/src/infrastructure/config/settings.rs

use serde::{Deserialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::cohort::CohortFolderTable;
use crate::domain::error::DomainError;
use crate::domain::ports::SettingsLoader;
use crate::domain::principal::PrincipalList;
use crate::domain::retry::RetryPolicy;
use crate::domain::schedule::ScheduleTable;
use crate::domain::settings::{ShareSettings, ShareThresholds};
use crate::infrastructure::error::InfrastructureError;

pub const MAIN_CONFIG_FILE: &str = "weekshare.yaml";

/// Shape of `weekshare.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekShareConfig {
    pub thresholds: ShareThresholds,
    /// Only addresses in this domain are read from the principals file.
    #[serde(default = "default_domain")]
    pub principal_domain: String,
    #[serde(default = "default_domain")]
    pub trusted_domain: String,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub files: SatelliteFiles,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SatelliteFiles {
    pub schedule: String,
    pub folders: String,
    pub principals: String,
}

impl Default for SatelliteFiles {
    fn default() -> Self {
        Self {
            schedule: "schedule.yml".into(),
            folders: "folders.yml".into(),
            principals: "users.txt".into(),
        }
    }
}

fn default_domain() -> String {
    "gmail.com".into()
}

/// Reads the configuration directory on every call so edits apply without a restart.
pub struct FileSettingsLoader {
    dir: PathBuf,
}

impl FileSettingsLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads with an explicit variable lookup, `load` uses the process environment.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<ShareSettings, InfrastructureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        load_settings(&self.dir, lookup)
    }
}

impl SettingsLoader for FileSettingsLoader {
    fn load(&self) -> Result<ShareSettings, DomainError> {
        self.load_with_env(|key| std::env::var(key).ok())
            .map_err(|e| DomainError::SettingsLoad(e.to_string()))
    }
}

#[instrument(skip(dir, lookup), fields(dir = %dir.display()))]
fn load_settings<F>(dir: &Path, lookup: F) -> Result<ShareSettings, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = dir.join(MAIN_CONFIG_FILE);
    if !config_path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            config_path.display().to_string(),
        ));
    }
    let mut config: WeekShareConfig = load_fragment(&config_path)?;

    apply_env_overrides(&mut config.thresholds, &lookup)?;

    let schedule: ScheduleTable = load_fragment(&dir.join(&config.files.schedule))?;
    let folders: CohortFolderTable = load_fragment(&dir.join(&config.files.folders))?;

    let principals_path = dir.join(&config.files.principals);
    let content = fs::read_to_string(&principals_path)
        .map_err(|e| InfrastructureError::io(&principals_path, e))?;
    let principals = PrincipalList::parse(&content, &config.principal_domain);
    if principals.is_empty() {
        warn!(path = %principals_path.display(), "No principal found, nothing will be granted");
    }

    let settings = ShareSettings {
        thresholds: config.thresholds,
        trusted_domain: config.trusted_domain,
        retry: config.retry,
        schedule,
        folders,
        principals,
    };
    settings
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    info!(
        current_cohort = settings.thresholds.current_cohort,
        last_week = settings.thresholds.last_week,
        cohorts = settings.folders.len(),
        principals = settings.principals.len(),
        weeks = settings.schedule.len(),
        "⚙️  Settings loaded"
    );
    Ok(settings)
}

/// Typed fragment read from one YAML file.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path).map_err(|e| InfrastructureError::io(path, e))?;
    serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
        path: path.display().to_string(),
        source,
    })
}

fn apply_env_overrides<F>(
    thresholds: &mut ShareThresholds,
    lookup: &F,
) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let parse = |key: &str, raw: String| {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| InfrastructureError::ConfigError(format!("{key}={raw} is not a number")))
    };

    if let Some(val) = lookup("WEEKSHARE_CURRENT_COHORT") {
        let val = parse("WEEKSHARE_CURRENT_COHORT", val)?;
        info!(old = thresholds.current_cohort, new = val, "Overriding current cohort via ENV");
        thresholds.current_cohort = val;
    }
    if let Some(val) = lookup("WEEKSHARE_LAST_WEEK") {
        let val = parse("WEEKSHARE_LAST_WEEK", val)?;
        info!(old = thresholds.last_week, new = val, "Overriding last week via ENV");
        thresholds.last_week = val;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use tempfile::TempDir;

    const MAIN: &str = "\
thresholds:
  current_cohort: 8
  last_week: 9
retry:
  base_delay_ms: 1000
";

    fn write_config(main: &str) -> Result<TempDir> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(MAIN_CONFIG_FILE), main)?;
        fs::write(
            dir.path().join("schedule.yml"),
            "1: 2025-10-20\n2: 2025-10-27\n3: 2025-11-03\n",
        )?;
        fs::write(
            dir.path().join("folders.yml"),
            "\"7기\": root-7\n\"8기\": root-8\n",
        )?;
        fs::write(
            dir.path().join("users.txt"),
            "# mentors\nalice@gmail.com\n\n  bob@gmail.com  \ncarol@corp.example\n",
        )?;
        Ok(dir)
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_loads_main_and_satellites() -> Result<()> {
        let dir = write_config(MAIN)?;
        let settings = FileSettingsLoader::new(dir.path()).load_with_env(no_env)?;

        assert_eq!(settings.thresholds.current_cohort, 8);
        assert_eq!(settings.thresholds.minimum_cohort, 3);
        assert_eq!(settings.trusted_domain, "gmail.com");
        assert_eq!(settings.retry.base_delay_ms, 1000);
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.folders.get("8기").map(String::as_str), Some("root-8"));
        assert_eq!(settings.principals.len(), 2);
        assert_eq!(
            settings
                .schedule
                .current_week(NaiveDate::from_ymd_opt(2025, 10, 28).unwrap()),
            Some(2)
        );
        Ok(())
    }

    #[test]
    fn test_env_overrides_thresholds() -> Result<()> {
        let dir = write_config(MAIN)?;
        let env: HashMap<&str, &str> =
            HashMap::from([("WEEKSHARE_CURRENT_COHORT", "9"), ("WEEKSHARE_LAST_WEEK", "10")]);

        let settings = FileSettingsLoader::new(dir.path())
            .load_with_env(|k| env.get(k).map(|v| v.to_string()))?;

        assert_eq!(settings.thresholds.current_cohort, 9);
        assert_eq!(settings.thresholds.last_week, 10);
        Ok(())
    }

    #[test]
    fn test_non_numeric_override_is_rejected() -> Result<()> {
        let dir = write_config(MAIN)?;
        let res = FileSettingsLoader::new(dir.path())
            .load_with_env(|k| (k == "WEEKSHARE_LAST_WEEK").then(|| "nine".to_string()));
        assert!(matches!(res, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }

    #[test]
    fn test_invalid_thresholds_fail_validation() -> Result<()> {
        let dir = write_config(
            "thresholds:\n  current_cohort: 2\n  last_week: 9\n  minimum_cohort: 3\n",
        )?;
        let res = FileSettingsLoader::new(dir.path()).load_with_env(no_env);
        assert!(matches!(res, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }

    #[test]
    fn test_broken_yaml_is_a_yaml_error() -> Result<()> {
        let dir = write_config(MAIN)?;
        fs::write(dir.path().join("schedule.yml"), "1: [not a date\n")?;

        let res = FileSettingsLoader::new(dir.path()).load_with_env(no_env);
        assert!(
            matches!(&res, Err(InfrastructureError::YamlError { path, .. }) if path.ends_with("schedule.yml")),
            "{:?}",
            res.err()
        );
        Ok(())
    }

    #[test]
    fn test_missing_principals_file_is_an_io_error() -> Result<()> {
        let dir = write_config(MAIN)?;
        fs::remove_file(dir.path().join("users.txt"))?;

        let res = FileSettingsLoader::new(dir.path()).load_with_env(no_env);
        assert!(matches!(res, Err(InfrastructureError::Io { path, .. }) if path.ends_with("users.txt")));
        Ok(())
    }

    #[test]
    fn test_missing_main_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let res = FileSettingsLoader::new(dir.path()).load_with_env(no_env);
        assert!(matches!(res, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_missing_satellite_maps_to_settings_load() -> Result<()> {
        let dir = write_config(MAIN)?;
        fs::remove_file(dir.path().join("folders.yml"))?;

        let res = SettingsLoader::load(&FileSettingsLoader::new(dir.path()));
        assert!(matches!(res, Err(DomainError::SettingsLoad(msg)) if msg.contains("folders.yml")));
        Ok(())
    }
}
