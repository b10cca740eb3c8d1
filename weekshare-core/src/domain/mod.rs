// weekshare-core/src/domain/mod.rs

pub mod channel;
pub mod cohort;
pub mod command;
pub mod error;
pub mod ports;
pub mod principal;
pub mod retry;
pub mod schedule;
pub mod settings;
pub mod share;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use principal::{Principal, PrincipalList};
pub use retry::RetryPolicy;
pub use schedule::ScheduleTable;
pub use settings::{ShareSettings, ShareThresholds};
pub use share::{ShareError, ShareOutcome, ShareRequest, ShareResult};
