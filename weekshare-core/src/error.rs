// weekshare-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::notifier::NotifyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeekShareError {
    // --- ERREURS DU DOMAINE (Settings, Cohorts, Folders) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, HTTP, Templates) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS DE TRANSPORT (canal d'exploitation) ---
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
