// src/config.rs

//! Configuration loading utilities.
//!
//! Resolves the effective client configuration from a TOML file, the process
//! environment, and built-in defaults, in that order of precedence (env wins).

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Load configuration from `path`, apply environment overrides, and validate.
///
/// A missing or unreadable file falls back to defaults.
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let config = ClientConfig::load_or_default(path).with_env_overrides();
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;
    Ok(config)
}

/// Resolve the credentials file relative to the config file's directory.
pub fn credentials_path(config_path: &Path, config: &ClientConfig) -> PathBuf {
    if config.credentials_file.is_absolute() {
        return config.credentials_file.clone();
    }
    config_path
        .parent()
        .map(|dir| dir.join(&config.credentials_file))
        .unwrap_or_else(|| config.credentials_file.clone())
}
