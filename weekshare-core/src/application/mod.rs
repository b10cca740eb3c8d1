// weekshare-core/src/application/mod.rs

pub mod dispatcher;
pub mod granter;
pub mod guard;
pub mod messages;
pub mod orchestrator;
pub mod ports;
pub mod processor;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le binaire peut faire `use weekshare_core::application::{CommandDispatcher, ShareProcessor};`

pub use dispatcher::{ACK_BUDGET, CommandDispatcher, Dispatch};
pub use granter::{GrantError, GrantReceipt, PermissionGranter};
pub use guard::{DeliveryError, DeliveryReceipt, ResponseChannelGuard};
pub use orchestrator::{ShareContext, share_week_folders};
pub use processor::{ProcessOutcome, ShareProcessor};
