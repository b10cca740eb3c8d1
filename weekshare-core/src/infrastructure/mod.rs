// weekshare-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod clock;
pub mod config;
pub mod error;
pub mod templates;

pub use adapters::{GoogleDriveStore, HttpTaskInvoker, ReqwestChannelTransport, SlackNotifier};
pub use clock::SystemClock;
pub use config::FileSettingsLoader;
pub use templates::JinjaRenderer;
