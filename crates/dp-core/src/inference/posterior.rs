//! Grid posterior for a per-trial success probability.
//!
//! Combines a Beta prior with a Binomial likelihood pointwise over a fixed
//! probability grid, in log-domain, and normalizes the product so it sums to 1
//! over the grid.

use dp_common::{Error, Result};
use dp_math::{binomial, log_beta_pdf, normalize_log_probs, BetaParams, ProbabilityGrid};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Observed successes out of a number of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawTrialOutcome")]
pub struct TrialOutcome {
    n_trials: u64,
    successes: u64,
}

/// Unchecked wire form; deserialization goes through [`TrialOutcome::new`].
#[derive(Deserialize, JsonSchema)]
struct RawTrialOutcome {
    n_trials: u64,
    successes: u64,
}

impl TryFrom<RawTrialOutcome> for TrialOutcome {
    type Error = Error;

    fn try_from(raw: RawTrialOutcome) -> Result<Self> {
        Self::new(raw.n_trials, raw.successes)
    }
}

impl TrialOutcome {
    /// Requires at least one trial and no more successes than trials.
    pub fn new(n_trials: u64, successes: u64) -> Result<Self> {
        if n_trials == 0 || successes > n_trials {
            return Err(Error::InvalidOutcome {
                successes,
                trials: n_trials,
            });
        }
        Ok(Self {
            n_trials,
            successes,
        })
    }

    pub fn n_trials(&self) -> u64 {
        self.n_trials
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.n_trials - self.successes
    }
}

/// Prior, likelihood and posterior evaluated at every grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurves {
    pub grid: Vec<f64>,
    pub prior: Vec<f64>,
    pub likelihood: Vec<f64>,
    pub unnormalized_posterior: Vec<f64>,
    /// Sums to 1 over the grid.
    pub posterior: Vec<f64>,
}

impl DensityCurves {
    /// Curves rescaled so each peaks at 1, for overlaying on one axis.
    pub fn display(&self) -> DisplayCurves {
        DisplayCurves {
            grid: self.grid.clone(),
            prior: scale_to_max(&self.prior),
            likelihood: scale_to_max(&self.likelihood),
            posterior: scale_to_max(&self.posterior),
        }
    }

    /// Grid point carrying the most posterior mass.
    pub fn mode(&self) -> f64 {
        let mut best = 0;
        for (i, &w) in self.posterior.iter().enumerate() {
            if w > self.posterior[best] {
                best = i;
            }
        }
        self.grid.get(best).copied().unwrap_or(f64::NAN)
    }

    pub fn mean(&self) -> f64 {
        self.grid
            .iter()
            .zip(&self.posterior)
            .map(|(p, w)| p * w)
            .sum()
    }

    /// Central interval read off the cumulative grid posterior.
    pub fn credible_interval(&self, level: f64) -> CredibleInterval {
        let tail = (1.0 - level) / 2.0;
        let mut lower = None;
        let mut upper = None;
        let mut cumulative = 0.0;
        for (&p, &w) in self.grid.iter().zip(&self.posterior) {
            cumulative += w;
            if lower.is_none() && cumulative >= tail {
                lower = Some(p);
            }
            // Rounding can leave the total a hair under 1.
            if upper.is_none() && cumulative >= (1.0 - tail) - 1e-12 {
                upper = Some(p);
            }
        }
        let last = self.grid.last().copied().unwrap_or(f64::NAN);
        CredibleInterval {
            level,
            lower: lower.unwrap_or(last),
            upper: upper.unwrap_or(last),
        }
    }
}

/// Display-only copies of the curves, each divided by its own maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DisplayCurves {
    pub grid: Vec<f64>,
    pub prior: Vec<f64>,
    pub likelihood: Vec<f64>,
    pub posterior: Vec<f64>,
}

/// Divide every value by the maximum. An all-zero curve is returned unchanged.
pub fn scale_to_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return values.to_vec();
    }
    values.iter().map(|v| v / max).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CredibleInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Closed-form Beta(alpha + k, beta + n - k) posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConjugatePosterior {
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
    pub interval: CredibleInterval,
}

/// Point summaries of a grid posterior next to its conjugate reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PosteriorSummary {
    pub grid_mean: f64,
    pub grid_mode: f64,
    pub grid_interval: CredibleInterval,
    pub conjugate: ConjugatePosterior,
}

impl PosteriorSummary {
    pub fn from_curves(
        curves: &DensityCurves,
        prior: &BetaParams,
        outcome: &TrialOutcome,
        level: f64,
    ) -> Result<Self> {
        let conjugate = binomial::posterior_params(prior, outcome.successes(), outcome.n_trials())
            .ok_or_else(|| {
                Error::Inference(format!(
                    "conjugate update failed for Beta({}, {}) with {}/{}",
                    prior.alpha,
                    prior.beta,
                    outcome.successes(),
                    outcome.n_trials()
                ))
            })?;
        let (lower, upper) = conjugate.credible_interval(level);
        Ok(Self {
            grid_mean: curves.mean(),
            grid_mode: curves.mode(),
            grid_interval: curves.credible_interval(level),
            conjugate: ConjugatePosterior {
                alpha: conjugate.alpha,
                beta: conjugate.beta,
                mean: conjugate.mean(),
                interval: CredibleInterval {
                    level,
                    lower,
                    upper,
                },
            },
        })
    }
}

/// Log prior density at grid point `p`.
///
/// Where the density is infinite (alpha < 1 at 0, beta < 1 at 1) the point
/// is evaluated half a grid step inward.
fn log_prior_at(p: f64, prior: &BetaParams, half_step: f64) -> Result<f64> {
    let mut value = log_beta_pdf(p, prior.alpha, prior.beta);
    if value == f64::INFINITY {
        let inward = if p < 0.5 { p + half_step } else { p - half_step };
        value = log_beta_pdf(inward, prior.alpha, prior.beta);
    }
    if value.is_nan() || value == f64::INFINITY {
        return Err(Error::InvalidPrior {
            alpha: prior.alpha,
            beta: prior.beta,
        });
    }
    Ok(value)
}

/// Evaluate prior, likelihood and normalized posterior over `grid`.
pub fn grid_posterior(
    grid: &ProbabilityGrid,
    prior: &BetaParams,
    outcome: &TrialOutcome,
) -> Result<DensityCurves> {
    let half_step = grid.step() / 2.0;
    let k = outcome.successes();
    let n = outcome.n_trials();

    let mut log_prior = Vec::with_capacity(grid.len());
    let mut log_likelihood = Vec::with_capacity(grid.len());
    for &p in grid.points() {
        log_prior.push(log_prior_at(p, prior, half_step)?);
        let ll = binomial::log_pmf(k, n, p);
        if ll.is_nan() {
            return Err(Error::Inference(format!(
                "likelihood undefined at p={} for {}/{}",
                p, k, n
            )));
        }
        log_likelihood.push(ll);
    }

    let log_unnormalized: Vec<f64> = log_prior
        .iter()
        .zip(&log_likelihood)
        .map(|(lp, ll)| lp + ll)
        .collect();

    let posterior = normalize_log_probs(&log_unnormalized).ok_or_else(|| {
        Error::NumericalInstability(format!(
            "posterior mass vanished on a {}-point grid for Beta({}, {}) and {}/{}",
            grid.len(),
            prior.alpha,
            prior.beta,
            k,
            n
        ))
    })?;

    Ok(DensityCurves {
        grid: grid.points().to_vec(),
        prior: log_prior.iter().map(|v| v.exp()).collect(),
        likelihood: log_likelihood.iter().map(|v| v.exp()).collect(),
        unnormalized_posterior: log_unnormalized.iter().map(|v| v.exp()).collect(),
        posterior,
    })
}
