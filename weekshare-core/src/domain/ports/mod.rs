// weekshare-core/src/domain/ports/mod.rs

pub mod settings;

pub use settings::SettingsLoader;
