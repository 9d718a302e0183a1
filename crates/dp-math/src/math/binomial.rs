//! Binomial likelihood and the Beta-Binomial conjugate update.
//!
//! The model uses:
//! - Prior: `p ~ Beta(α, β)`
//! - Likelihood: `k | p ~ Binomial(n, p)`
//! - Posterior: `p | k,n ~ Beta(α + k, β + (n-k))`
//!
//! The grid posterior in `dp-core` evaluates the likelihood pointwise; the
//! closed-form update here is the analytic reference it is checked against.

use super::beta::BetaParams;
use super::stable::log_binomial;

/// Log probability mass of `k` successes in `n` trials with success probability `p`.
///
/// Returns NEG_INFINITY for impossible outcomes and NAN for `p` outside [0, 1].
pub fn log_pmf(k: u64, n: u64, p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if k > n {
        return f64::NEG_INFINITY;
    }
    // Exact boundaries avoid 0 * ln(0).
    if p == 0.0 {
        return if k == 0 { 0.0 } else { f64::NEG_INFINITY };
    }
    if p == 1.0 {
        return if k == n { 0.0 } else { f64::NEG_INFINITY };
    }
    let failures = (n - k) as f64;
    log_binomial(n, k) + (k as f64) * p.ln() + failures * (-p).ln_1p()
}

/// Probability mass of `k` successes in `n` trials with success probability `p`.
pub fn pmf(k: u64, n: u64, p: f64) -> f64 {
    let log_p = log_pmf(k, n, p);
    if log_p.is_nan() {
        return f64::NAN;
    }
    if log_p == f64::NEG_INFINITY {
        return 0.0;
    }
    log_p.exp()
}

/// Compute posterior parameters after observing k successes in n trials.
///
/// # Returns
/// Posterior BetaParams, or None if `k > n`.
///
/// # Example
/// ```
/// use dp_math::binomial::posterior_params;
/// use dp_math::BetaParams;
///
/// let prior = BetaParams::new(10.0, 10.0).unwrap();
/// let posterior = posterior_params(&prior, 3, 50).unwrap();
/// assert!((posterior.mean() - 13.0 / 70.0).abs() < 1e-12);
/// ```
pub fn posterior_params(prior: &BetaParams, k: u64, n: u64) -> Option<BetaParams> {
    if k > n {
        return None;
    }
    BetaParams::new(prior.alpha + k as f64, prior.beta + (n - k) as f64)
}
