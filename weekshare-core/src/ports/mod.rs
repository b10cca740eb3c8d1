// weekshare-core/src/ports/mod.rs
//
// Contracts the application depends on. Adapters live in `infrastructure`.

pub mod channel;
pub mod clock;
pub mod folder_store;
pub mod invoker;
pub mod notifier;

pub use channel::{ChannelTransport, TransportResponse};
pub use clock::Clock;
pub use folder_store::{FolderStore, PermissionReceipt, PermissionRequest, StoreError};
pub use invoker::{HandoffError, TaskInvoker};
pub use notifier::{NotifyError, OpsNotifier};
