//! Subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod suppliers;

use std::path::{Path, PathBuf};

use tracing::debug;

use crel_core::models::config::CrelConfig;
use crel_core::suppliers::SupplierDirectory;

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CrelConfig> {
    if let Some(path) = config_path {
        return Ok(CrelConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(CrelConfig::from_file(&default_path)?)
    } else {
        Ok(CrelConfig::default())
    }
}

/// Load the supplier directory, preferring an explicit dataset path.
///
/// A missing or malformed dataset is fatal: every extraction consults it.
pub fn load_directory(
    config: &CrelConfig,
    dataset: Option<&PathBuf>,
) -> anyhow::Result<SupplierDirectory> {
    let path = dataset.unwrap_or(&config.suppliers.dataset);
    let directory = SupplierDirectory::from_path(path)
        .map_err(|e| anyhow::anyhow!("Cannot start without a supplier directory: {}", e))?;
    debug!("Supplier directory ready with {} entries", directory.len());
    Ok(directory)
}
