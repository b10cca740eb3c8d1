// weekshare-core/src/infrastructure/config/mod.rs

pub mod settings;

pub use settings::{FileSettingsLoader, MAIN_CONFIG_FILE, SatelliteFiles, WeekShareConfig};
