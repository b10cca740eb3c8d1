// weekshare-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Drive, Slack, hand-off, horloge
pub mod ports;

// 2. Domain (Cœur du métier)
// Calendrier, cohortes, plan de partage, garde des URLs
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Google Drive, Slack, fichiers de config, Jinja
pub mod infrastructure;

// 4. Application (Use Cases)
// Dispatcher, processeur, orchestration des partages
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

#[cfg(test)]
pub mod test_utils;

// --- RE-EXPORTS (FACADE) ---
pub use error::WeekShareError;
