//! Inventory of the modules in the current build list
//!
//! # Modules
//!
//! - [`splitter`]: splits concatenated `go list -m -json` output into records
//! - [`module`]: decoded module record ([`InstalledModuleInfo`])
//! - [`report`]: table rows for the `analyzed` and `updates` commands

pub mod module;
pub mod report;
pub mod splitter;

use thiserror::Error;
use tracing::{debug, error};

use crate::toolchain::{InventorySource, ToolchainError};

pub use module::{InstalledModuleInfo, Relation};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("list modules failed: {0}")]
    List(#[from] ToolchainError),

    #[error("decode module record failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decodes every record of a concatenated-JSON buffer.
///
/// Any malformed record fails the whole batch.
pub fn decode(raw: &[u8]) -> Result<Vec<InstalledModuleInfo>, InventoryError> {
    splitter::split(raw)
        .map(|record| serde_json::from_slice(record).map_err(InventoryError::from))
        .collect()
}

/// Lists and decodes the build list; `check_updates` fills `Update`
pub async fn collect<S: InventorySource + ?Sized>(
    source: &S,
    check_updates: bool,
) -> Result<Vec<InstalledModuleInfo>, InventoryError> {
    let raw = source
        .list_modules(check_updates)
        .await
        .inspect_err(|e| error!("go list failed: {}", e))?;
    let modules = decode(&raw)?;
    debug!("Decoded {} module records", modules.len());
    Ok(modules)
}
