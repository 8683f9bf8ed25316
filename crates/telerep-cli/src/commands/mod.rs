//! Subcommands of the `telerep` binary.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use telerep_core::ReportConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("telerep")
        .join("config.json")
}

/// Load the configuration from `path`, else from the user file, else defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ReportConfig> {
    if let Some(path) = path {
        return Ok(ReportConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(ReportConfig::from_file(&default_path)?)
    } else {
        Ok(ReportConfig::default())
    }
}
