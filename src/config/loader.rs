//! Configuration file discovery and loading.

use crate::config::schema::{SupplyConfig, STATE_DIR};
use crate::error::{Result, SupplyError};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the project config: `<build>/.depsupply/config.yml`.
pub fn project_config_path(build_dir: &Path) -> PathBuf {
    build_dir.join(STATE_DIR).join("config.yml")
}

/// Load a single config file and parse it into SupplyConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SupplyConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SupplyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SupplyError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SupplyConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SupplyConfig> {
    if content.trim().is_empty() {
        return Ok(SupplyConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| SupplyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the project config is used if
/// present and the defaults otherwise.
pub fn load_config(build_dir: &Path, config_override: Option<&Path>) -> Result<SupplyConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    let path = project_config_path(build_dir);
    if path.is_file() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        Ok(SupplyConfig::default())
    }
}
