//! Settings validation errors and semantic validation.

use thiserror::Error;

use crate::settings::Settings;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Settings validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Largest grid the estimator will allocate.
pub const MAX_GRID_POINTS: usize = 1_000_000;

fn invalid(field: &str, message: String) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message,
    }
}

/// Validate estimator settings semantically.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    if settings.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: settings.schema_version.clone(),
        });
    }

    if settings.grid_points < 2 || settings.grid_points > MAX_GRID_POINTS {
        return Err(invalid(
            "grid_points",
            format!(
                "Must be in [2, {}], got {}",
                MAX_GRID_POINTS, settings.grid_points
            ),
        ));
    }

    if !settings.prior_scale.is_finite() || settings.prior_scale <= 0.0 {
        return Err(invalid(
            "prior_scale",
            format!("Must be finite and > 0, got {}", settings.prior_scale),
        ));
    }

    let eps = settings.boundary_epsilon;
    if eps.is_nan() || eps <= 0.0 || 2.0 * eps >= settings.prior_scale {
        return Err(invalid(
            "boundary_epsilon",
            format!(
                "Must be in (0, prior_scale / 2) = (0, {}), got {}",
                settings.prior_scale / 2.0,
                eps
            ),
        ));
    }

    if settings.simulation_samples == 0 {
        return Err(invalid("simulation_samples", "Must be > 0".to_string()));
    }

    if settings.default_dice == 0 {
        return Err(invalid("default_dice", "Must be >= 1".to_string()));
    }

    if settings.max_dice < settings.default_dice {
        return Err(ValidationError::SemanticError(format!(
            "max_dice ({}) must be >= default_dice ({})",
            settings.max_dice, settings.default_dice
        )));
    }

    if settings.credible_level.is_nan()
        || settings.credible_level <= 0.0
        || settings.credible_level >= 1.0
    {
        return Err(invalid(
            "credible_level",
            format!("Must be in (0, 1), got {}", settings.credible_level),
        ));
    }

    let coin = &settings.coin;
    if coin.n_trials == 0 {
        return Err(invalid("coin.n_trials", "Must be >= 1".to_string()));
    }
    if coin.heads > coin.n_trials {
        return Err(ValidationError::SemanticError(format!(
            "coin.heads ({}) exceeds coin.n_trials ({})",
            coin.heads, coin.n_trials
        )));
    }
    validate_beta_params("coin", coin.alpha, coin.beta)?;

    Ok(())
}

/// Validate Beta distribution parameters.
fn validate_beta_params(field: &str, alpha: f64, beta: f64) -> ValidationResult<()> {
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(invalid(
            &format!("{}.alpha", field),
            format!("Must be finite and > 0, got {}", alpha),
        ));
    }
    if !beta.is_finite() || beta <= 0.0 {
        return Err(invalid(
            &format!("{}.beta", field),
            format!("Must be finite and > 0, got {}", beta),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate_settings(&Settings::default()).expect("defaults should validate");
    }

    #[test]
    fn rejects_single_point_grid() {
        let settings = Settings {
            grid_points: 1,
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "grid_points"));
    }

    #[test]
    fn rejects_grid_too_large_to_allocate() {
        let at_limit = Settings {
            grid_points: MAX_GRID_POINTS,
            ..Settings::default()
        };
        assert!(validate_settings(&at_limit).is_ok());

        let settings = Settings {
            grid_points: 100_000_000_000,
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "grid_points"));
    }

    #[test]
    fn rejects_epsilon_wider_than_scale() {
        let settings = Settings {
            prior_scale: 1.0,
            boundary_epsilon: 0.5,
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn rejects_version_mismatch() {
        let settings = Settings {
            schema_version: "0.9.0".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(ValidationError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn rejects_impossible_coin_observation() {
        let mut settings = Settings::default();
        settings.coin.heads = 60;
        assert!(matches!(
            validate_settings(&settings),
            Err(ValidationError::SemanticError(_))
        ));
    }

    #[test]
    fn rejects_non_positive_coin_prior() {
        let mut settings = Settings::default();
        settings.coin.beta = 0.0;
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "coin.beta"));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ValidationError::ParseError("x".into()).code(), 61);
        assert_eq!(
            ValidationError::InvalidValue {
                field: "f".into(),
                message: "m".into()
            }
            .code(),
            65
        );
    }
}
