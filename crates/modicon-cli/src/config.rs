//! Configuration and catalog file loading for the CLI
//!
//! This module handles finding and loading the TOML configuration file
//! from various locations (explicit path, local directory, system directory),
//! and loading the model catalog the icons are rendered from.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::de::DeserializeOwned;
use thiserror::Error;

use modicon::{ModelCatalog, ModiconError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ModiconError {
    fn from(err: ConfigError) -> Self {
        ModiconError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (modicon/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ModiconError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_toml_file(path);
    }

    let local_config = Path::new("modicon/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_toml_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "modicon", "modicon") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_toml_file(&system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load a model catalog.
///
/// Relative directories and resource paths in the catalog are taken
/// relative to the catalog file.
///
/// # Errors
///
/// Returns error if the file is missing, unreadable or not a valid catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<ModelCatalog, ModiconError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading model catalog");
    let catalog: ModelCatalog = load_toml_file(path)?;

    let root = path.parent().unwrap_or(Path::new(""));
    let catalog = catalog.with_root(root);
    debug!(classes = catalog.class_names().count(); "Model catalog loaded");
    Ok(catalog)
}

/// Read and deserialize a TOML file.
fn load_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T, ModiconError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let value = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(value)
}
