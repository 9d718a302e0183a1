//! Settings loading with provenance.
//!
//! Resolution is delegated to `dp-config`; this module reads the resolved
//! file, records its SHA-256 and validates the result.

use std::path::{Path, PathBuf};

use dp_config::{resolve_config, validate_settings, ConfigSource, Settings, ValidationError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Cannot parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for dp_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(e) => dp_common::Error::InvalidSettings(e.to_string()),
            other => dp_common::Error::Config(other.to_string()),
        }
    }
}

/// Settings together with where they came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: Settings,
    /// Path to the settings file (None if using defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
    /// SHA-256 of the file content (None if using defaults).
    pub hash: Option<String>,
}

impl ResolvedConfig {
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            path: self.path.clone(),
            source: self.source.to_string(),
            hash: self.hash.clone(),
            schema_version: self.settings.schema_version.clone(),
        }
    }
}

/// Provenance block embedded in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfigSnapshot {
    pub path: Option<PathBuf>,
    pub source: String,
    pub hash: Option<String>,
    pub schema_version: String,
}

/// Load settings with the standard resolution order and validate them.
pub fn load_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let paths = resolve_config(cli_path);

    let resolved = match paths.settings {
        Some(path) => {
            let (settings, hash) = load_settings_from_file(&path)?;
            ResolvedConfig {
                settings,
                path: Some(path),
                source: paths.settings_source,
                hash: Some(hash),
            }
        }
        None => ResolvedConfig {
            settings: Settings::default(),
            path: None,
            source: ConfigSource::BuiltinDefault,
            hash: None,
        },
    };

    validate_settings(&resolved.settings)?;
    Ok(resolved)
}

fn load_settings_from_file(path: &Path) -> Result<(Settings, String), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let hash = compute_hash(&content);

    let settings = Settings::from_json(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok((settings, hash))
}

/// Hex SHA-256 of `content`.
pub fn compute_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
