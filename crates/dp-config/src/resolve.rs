//! Settings path resolution.
//!
//! Resolution order: CLI argument → environment variables → XDG path → defaults.

use std::path::{Path, PathBuf};

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to settings.json (or None if not found).
    pub settings: Option<PathBuf>,

    /// Source of the settings (for diagnostics).
    pub settings_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_SETTINGS_PATH: &str = "DICE_POSTERIOR_CONFIG";
pub const ENV_CONFIG_DIR: &str = "DICE_POSTERIOR_CONFIG_DIR";

/// Standard settings file name.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Application name for XDG directories.
const APP_NAME: &str = "dice-posterior";

/// Resolve the settings path using the standard resolution order.
///
/// 1. Explicit CLI path (returned even if missing, so the loader reports it)
/// 2. `DICE_POSTERIOR_CONFIG`
/// 3. `DICE_POSTERIOR_CONFIG_DIR` + `settings.json`
/// 4. XDG config directory (`~/.config/dice-posterior/settings.json`)
/// 5. Built-in defaults (None)
pub fn resolve_config(cli_settings: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();

    // An explicit path is never silently skipped.
    if let Some(path) = cli_settings {
        paths.settings = Some(path.to_path_buf());
        paths.settings_source = ConfigSource::CliArgument;
        return paths;
    }

    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            paths.settings = Some(path);
            paths.settings_source = ConfigSource::Environment;
            return paths;
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            paths.settings = Some(path);
            paths.settings_source = ConfigSource::Environment;
            return paths;
        }
    }

    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(SETTINGS_FILENAME);
        if path.exists() {
            paths.settings = Some(path);
            paths.settings_source = ConfigSource::XdgConfig;
            return paths;
        }
    }

    paths.settings_source = ConfigSource::BuiltinDefault;
    paths
}

/// Get the XDG config directory for dice-posterior.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
