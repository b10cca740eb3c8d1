// weekshare-core/src/domain/ports/settings.rs

use crate::domain::error::DomainError;
use crate::domain::settings::ShareSettings;

pub trait SettingsLoader: Send + Sync {
    fn load(&self) -> Result<ShareSettings, DomainError>;
}
