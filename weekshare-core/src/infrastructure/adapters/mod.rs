// weekshare-core/src/infrastructure/adapters/mod.rs

pub mod drive;
pub mod invoker;
pub mod slack;

pub use drive::GoogleDriveStore;
pub use invoker::{HttpTaskInvoker, TOKEN_HEADER};
pub use slack::{ReqwestChannelTransport, SlackNotifier};
