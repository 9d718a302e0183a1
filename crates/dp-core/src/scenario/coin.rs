//! Fixed coin-flip scenario.

use dp_common::{Error, Result};
use dp_config::CoinSettings;
use dp_math::BetaParams;

use crate::inference::TrialOutcome;

/// A coin flipped `n_trials` times that came up heads `heads` times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinScenario {
    pub prior: BetaParams,
    pub outcome: TrialOutcome,
}

impl CoinScenario {
    pub fn new(prior: BetaParams, outcome: TrialOutcome) -> Self {
        Self { prior, outcome }
    }

    /// Build the scenario from the `coin` settings block.
    pub fn from_settings(settings: &CoinSettings) -> Result<Self> {
        let prior = BetaParams::new(settings.alpha, settings.beta).ok_or(Error::InvalidPrior {
            alpha: settings.alpha,
            beta: settings.beta,
        })?;
        let outcome = TrialOutcome::new(u64::from(settings.n_trials), u64::from(settings.heads))?;
        Ok(Self::new(prior, outcome))
    }

    /// Apply command-line overrides on top of the configured scenario.
    pub fn with_overrides(
        settings: &CoinSettings,
        n_trials: Option<u32>,
        heads: Option<u32>,
        alpha: Option<f64>,
        beta: Option<f64>,
    ) -> Result<Self> {
        let merged = CoinSettings {
            n_trials: n_trials.unwrap_or(settings.n_trials),
            heads: heads.unwrap_or(settings.heads),
            alpha: alpha.unwrap_or(settings.alpha),
            beta: beta.unwrap_or(settings.beta),
        };
        Self::from_settings(&merged)
    }
}
