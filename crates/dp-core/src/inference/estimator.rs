//! Posterior estimator driven by the estimator settings.

use dp_common::{Error, Result};
use dp_config::Settings;
use dp_math::{BetaParams, ProbabilityGrid};
use rand::Rng;

use super::posterior::{grid_posterior, DensityCurves, PosteriorSummary, TrialOutcome};
use crate::logging::event_names;
use crate::sampling::sample_binomial;
use crate::scenario::{adjust_probability, DiceEvent};

/// Numeric knobs of the estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub grid_points: usize,
    pub prior_scale: f64,
    pub boundary_epsilon: f64,
    pub simulation_samples: usize,
    pub credible_level: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl EstimatorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            grid_points: settings.grid_points,
            prior_scale: settings.prior_scale,
            boundary_epsilon: settings.boundary_epsilon,
            simulation_samples: settings.simulation_samples,
            credible_level: settings.credible_level,
        }
    }
}

/// Result of one posterior update.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub prior: BetaParams,
    pub outcome: TrialOutcome,
    pub curves: DensityCurves,
    pub summary: PosteriorSummary,
}

/// A dice-event estimate together with how its evidence was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEstimate {
    pub event: DiceEvent,
    pub n_dice: u32,
    pub true_probability: f64,
    pub estimate: Estimate,
}

/// Runs prior × likelihood updates over a fixed grid.
#[derive(Debug, Clone)]
pub struct PosteriorEstimator {
    config: EstimatorConfig,
    grid: ProbabilityGrid,
}

impl PosteriorEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        let grid = ProbabilityGrid::linspace(config.grid_points).ok_or_else(|| {
            Error::InvalidSettings(format!(
                "grid_points must be at least 2, got {}",
                config.grid_points
            ))
        })?;
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn grid(&self) -> &ProbabilityGrid {
        &self.grid
    }

    /// Prior centred on `probability` with the configured pseudo-count.
    pub fn prior_for(&self, probability: f64) -> Result<BetaParams> {
        BetaParams::from_mean_concentration(
            probability,
            self.config.prior_scale,
            self.config.boundary_epsilon,
        )
        .ok_or(Error::InvalidPrior {
            alpha: probability * self.config.prior_scale,
            beta: self.config.prior_scale - probability * self.config.prior_scale,
        })
    }

    /// Update `prior` with an already observed `outcome`. Deterministic.
    pub fn estimate(&self, prior: BetaParams, outcome: TrialOutcome) -> Result<Estimate> {
        tracing::debug!(
            event = event_names::ESTIMATE_STARTED,
            alpha = prior.alpha,
            beta = prior.beta,
            successes = outcome.successes(),
            trials = outcome.n_trials(),
            grid_points = self.grid.len(),
            "starting posterior update"
        );

        let curves = grid_posterior(&self.grid, &prior, &outcome)?;
        let summary =
            PosteriorSummary::from_curves(&curves, &prior, &outcome, self.config.credible_level)?;

        tracing::info!(
            event = event_names::ESTIMATE_COMPLETED,
            successes = outcome.successes(),
            trials = outcome.n_trials(),
            posterior_mean = summary.grid_mean,
            posterior_mode = summary.grid_mode,
            "posterior update complete"
        );

        Ok(Estimate {
            prior,
            outcome,
            curves,
            summary,
        })
    }

    /// Derive the success probability for `event`, draw synthetic evidence
    /// from `rng` and update the matching prior.
    pub fn estimate_event<R: Rng + ?Sized>(
        &self,
        event: DiceEvent,
        n_dice: u32,
        rng: &mut R,
    ) -> Result<EventEstimate> {
        let true_probability =
            adjust_probability(event, n_dice, self.config.simulation_samples, rng);
        let n_trials = event.definition().n_trials;
        let successes = sample_binomial(rng, n_trials, true_probability);

        tracing::debug!(
            event = event_names::EVIDENCE_SAMPLED,
            dice_event = event.key(),
            n_dice,
            true_probability,
            successes,
            n_trials,
            "sampled synthetic evidence"
        );

        self.estimate_event_observed(event, n_dice, true_probability, u64::from(successes))
    }

    /// Same as [`estimate_event`](Self::estimate_event) with the success
    /// probability and success count supplied by the caller.
    pub fn estimate_event_observed(
        &self,
        event: DiceEvent,
        n_dice: u32,
        true_probability: f64,
        successes: u64,
    ) -> Result<EventEstimate> {
        let prior = self.prior_for(true_probability)?;
        let outcome = TrialOutcome::new(u64::from(event.definition().n_trials), successes)?;
        let estimate = self.estimate(prior, outcome)?;
        Ok(EventEstimate {
            event,
            n_dice: n_dice.max(1),
            true_probability,
            estimate,
        })
    }
}
