//! Estimator settings types.
//!
//! Every field has a built-in default, so a settings file only needs the
//! fields it overrides (plus `schema_version`).

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Complete estimator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub schema_version: String,

    /// Number of evenly spaced points covering [0, 1].
    pub grid_points: usize,

    /// Total pseudo-count of the Beta prior (alpha + beta).
    pub prior_scale: f64,

    /// Lower bound on either prior shape when the fair probability is 0 or 1.
    pub boundary_epsilon: f64,

    /// Rolls drawn when a dice probability has no closed form.
    pub simulation_samples: usize,

    /// Dice count used when the entered value is blank or not a number.
    pub default_dice: u32,

    /// Largest accepted dice count; larger entries are clamped.
    pub max_dice: u32,

    /// Mass of the central credible intervals in the report.
    pub credible_level: f64,

    /// Seed for the random source; entropy is used when absent.
    pub seed: Option<u64>,

    /// Fixed coin-flip scenario.
    pub coin: CoinSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            grid_points: 500,
            prior_scale: 10.0,
            boundary_epsilon: 1e-6,
            simulation_samples: 100_000,
            default_dice: 3,
            max_dice: 1_000,
            credible_level: 0.95,
            seed: None,
            coin: CoinSettings::default(),
        }
    }
}

/// Observation and prior of the coin-flip scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoinSettings {
    pub n_trials: u32,
    pub heads: u32,
    pub alpha: f64,
    pub beta: f64,
}

impl Default for CoinSettings {
    fn default() -> Self {
        Self {
            n_trials: 50,
            heads: 3,
            alpha: 10.0,
            beta: 10.0,
        }
    }
}

impl Settings {
    /// Parse settings from the content of a settings file.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }
}
