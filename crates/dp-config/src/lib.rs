//! Dice Posterior settings loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for settings.json
//! - Settings resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use settings::{CoinSettings, Settings};
pub use validate::{validate_settings, ValidationError, ValidationResult, MAX_GRID_POINTS};

/// Schema version for settings files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
