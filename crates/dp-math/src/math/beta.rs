//! Beta distribution utilities for Bayesian updates.
//!
//! Provides PDF, CDF, and inverse CDF, plus the [`BetaParams`] shape pair
//! used as the prior on a per-trial success probability.
//! The CDF uses the regularized incomplete beta function with
//! a continued-fraction approximation (Numerical Recipes).

use serde::{Deserialize, Serialize};

use super::stable::log_beta;

const BETACF_MAX_ITERS: usize = 200;
const BETACF_EPS: f64 = 3.0e-7;
const BETACF_FPMIN: f64 = 1.0e-30;

/// Shape parameters of a Beta distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    /// Shape parameter alpha (prior successes)
    pub alpha: f64,
    /// Shape parameter beta (prior failures)
    pub beta: f64,
}

impl BetaParams {
    /// Create new Beta parameters with validation.
    ///
    /// Returns None if parameters are invalid (non-positive, infinite or NaN).
    pub fn new(alpha: f64, beta: f64) -> Option<Self> {
        if !alpha.is_finite() || !beta.is_finite() || alpha <= 0.0 || beta <= 0.0 {
            return None;
        }
        Some(Self { alpha, beta })
    }

    /// Create Beta(1, 1) uniform prior.
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Build a prior centred on `mean` with total pseudo-count `concentration`.
    ///
    /// alpha = mean · concentration, beta = concentration − alpha. Alpha is
    /// clamped into `[epsilon, concentration − epsilon]` so a mean of exactly
    /// 0 or 1 still yields a proper density.
    ///
    /// ```
    /// use dp_math::BetaParams;
    ///
    /// let prior = BetaParams::from_mean_concentration(6.0 / 216.0, 10.0, 1e-6).unwrap();
    /// assert!((prior.alpha - 0.2778).abs() < 1e-3);
    /// assert!((prior.beta - 9.7222).abs() < 1e-3);
    /// ```
    pub fn from_mean_concentration(mean: f64, concentration: f64, epsilon: f64) -> Option<Self> {
        if mean.is_nan() || !(0.0..=1.0).contains(&mean) {
            return None;
        }
        if !concentration.is_finite() || concentration <= 0.0 {
            return None;
        }
        if epsilon.is_nan() || epsilon <= 0.0 || 2.0 * epsilon >= concentration {
            return None;
        }
        let alpha = (mean * concentration).clamp(epsilon, concentration - epsilon);
        Self::new(alpha, concentration - alpha)
    }

    /// Mean E[p] = α / (α + β).
    pub fn mean(&self) -> f64 {
        beta_mean(self.alpha, self.beta)
    }

    /// Density at x.
    pub fn pdf(&self, x: f64) -> f64 {
        beta_pdf(x, self.alpha, self.beta)
    }

    /// Central credible interval at `level` (e.g. 0.95).
    ///
    /// Returns (NaN, NaN) when level is outside (0, 1).
    pub fn credible_interval(&self, level: f64) -> (f64, f64) {
        if level.is_nan() || level <= 0.0 || level >= 1.0 {
            return (f64::NAN, f64::NAN);
        }
        let tail = (1.0 - level) / 2.0;
        (
            beta_inv_cdf(tail, self.alpha, self.beta),
            beta_inv_cdf(1.0 - tail, self.alpha, self.beta),
        )
    }
}

/// Mean of Beta(alpha, beta) = alpha / (alpha + beta).
pub fn beta_mean(alpha: f64, beta: f64) -> f64 {
    if alpha.is_nan() || beta.is_nan() || alpha <= 0.0 || beta <= 0.0 {
        return f64::NAN;
    }
    alpha / (alpha + beta)
}

/// Log of the Beta PDF at x.
pub fn log_beta_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x.is_nan() || alpha.is_nan() || beta.is_nan() {
        return f64::NAN;
    }
    if alpha <= 0.0 || beta <= 0.0 {
        return f64::NAN;
    }
    if !(0.0..=1.0).contains(&x) {
        return f64::NEG_INFINITY;
    }
    if x == 0.0 {
        if alpha < 1.0 {
            return f64::INFINITY;
        }
        if alpha > 1.0 {
            return f64::NEG_INFINITY;
        }
        return -log_beta(1.0, beta);
    }
    if x == 1.0 {
        if beta < 1.0 {
            return f64::INFINITY;
        }
        if beta > 1.0 {
            return f64::NEG_INFINITY;
        }
        return -log_beta(alpha, 1.0);
    }
    let log_x = x.ln();
    let log_one_minus = (-x).ln_1p();
    (alpha - 1.0) * log_x + (beta - 1.0) * log_one_minus - log_beta(alpha, beta)
}

/// Beta PDF at x.
pub fn beta_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    let log_pdf = log_beta_pdf(x, alpha, beta);
    if log_pdf.is_nan() {
        return f64::NAN;
    }
    if log_pdf == f64::INFINITY {
        return f64::INFINITY;
    }
    if log_pdf == f64::NEG_INFINITY {
        return 0.0;
    }
    log_pdf.exp()
}

/// Regularized incomplete beta function I_x(a,b).
pub fn beta_cdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x.is_nan() || alpha.is_nan() || beta.is_nan() {
        return f64::NAN;
    }
    if alpha <= 0.0 || beta <= 0.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_beta = log_beta(alpha, beta);
    let bt = (alpha * x.ln() + beta * (1.0 - x).ln() - ln_beta).exp();
    let threshold = (alpha + 1.0) / (alpha + beta + 2.0);
    if x < threshold {
        bt * betacf(alpha, beta, x) / alpha
    } else {
        1.0 - bt * betacf(beta, alpha, 1.0 - x) / beta
    }
}

/// Inverse CDF (quantile) for Beta(alpha, beta).
pub fn beta_inv_cdf(p: f64, alpha: f64, beta: f64) -> f64 {
    if p.is_nan() || alpha.is_nan() || beta.is_nan() {
        return f64::NAN;
    }
    if alpha <= 0.0 || beta <= 0.0 {
        return f64::NAN;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let mut low = 0.0;
    let mut high = 1.0;
    let mut mid = 0.5;
    let tol = 1e-10;
    for _ in 0..200 {
        mid = 0.5 * (low + high);
        let cdf = beta_cdf(mid, alpha, beta);
        if cdf.is_nan() {
            return f64::NAN;
        }
        let delta = cdf - p;
        if delta.abs() < tol {
            return mid;
        }
        if delta < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }
    mid
}

fn betacf(alpha: f64, beta: f64, x: f64) -> f64 {
    let qab = alpha + beta;
    let qap = alpha + 1.0;
    let qam = alpha - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < BETACF_FPMIN {
        d = BETACF_FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=BETACF_MAX_ITERS {
        let m_f = m as f64;
        let m2 = 2.0 * m_f;
        let aa = m_f * (beta - m_f) * x / ((qam + m2) * (alpha + m2));
        d = 1.0 + aa * d;
        if d.abs() < BETACF_FPMIN {
            d = BETACF_FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < BETACF_FPMIN {
            c = BETACF_FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(alpha + m_f) * (qab + m_f) * x / ((alpha + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < BETACF_FPMIN {
            d = BETACF_FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < BETACF_FPMIN {
            c = BETACF_FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() < BETACF_EPS {
            break;
        }
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn mean_matches_closed_form() {
        let params = BetaParams::new(2.0, 5.0).unwrap();
        assert!(approx_eq(params.mean(), 2.0 / 7.0, 1e-12));
    }

    #[test]
    fn new_rejects_invalid_shapes() {
        assert!(BetaParams::new(0.0, 1.0).is_none());
        assert!(BetaParams::new(1.0, -2.0).is_none());
        assert!(BetaParams::new(f64::NAN, 1.0).is_none());
        assert!(BetaParams::new(f64::INFINITY, 1.0).is_none());
    }

    #[test]
    fn from_mean_concentration_splits_scale() {
        let prior = BetaParams::from_mean_concentration(0.25, 10.0, 1e-6).unwrap();
        assert!(approx_eq(prior.alpha, 2.5, 1e-12));
        assert!(approx_eq(prior.beta, 7.5, 1e-12));
        assert!(approx_eq(prior.mean(), 0.25, 1e-12));
    }

    #[test]
    fn from_mean_concentration_clamps_degenerate_means() {
        let low = BetaParams::from_mean_concentration(0.0, 10.0, 1e-6).unwrap();
        assert!(approx_eq(low.alpha, 1e-6, 1e-15));
        assert!(low.beta > 0.0);

        let high = BetaParams::from_mean_concentration(1.0, 10.0, 1e-6).unwrap();
        assert!(approx_eq(high.beta, 1e-6, 1e-12));
        assert!(high.alpha > 0.0);
    }

    #[test]
    fn from_mean_concentration_rejects_bad_inputs() {
        assert!(BetaParams::from_mean_concentration(1.5, 10.0, 1e-6).is_none());
        assert!(BetaParams::from_mean_concentration(0.5, 0.0, 1e-6).is_none());
        assert!(BetaParams::from_mean_concentration(0.5, 10.0, 0.0).is_none());
        assert!(BetaParams::from_mean_concentration(0.5, 10.0, 6.0).is_none());
    }

    #[test]
    fn pdf_uniform_is_one() {
        assert!(approx_eq(beta_pdf(0.33, 1.0, 1.0), 1.0, 1e-12));
    }

    #[test]
    fn pdf_known_value_beta_2_5() {
        assert!(approx_eq(beta_pdf(0.2, 2.0, 5.0), 2.4576, 1e-6));
    }

    #[test]
    fn pdf_symmetry() {
        let left = beta_pdf(0.27, 2.3, 4.7);
        let right = beta_pdf(0.73, 4.7, 2.3);
        assert!(approx_eq(left, right, 1e-10));
    }

    #[test]
    fn log_pdf_matches_pdf() {
        let pdf = beta_pdf(0.4, 1.2, 3.4);
        let log_pdf = log_beta_pdf(0.4, 1.2, 3.4);
        assert!(approx_eq(pdf.ln(), log_pdf, 1e-10));
    }

    #[test]
    fn cdf_uniform_matches_identity() {
        assert!(approx_eq(beta_cdf(0.42, 1.0, 1.0), 0.42, 1e-6));
    }

    #[test]
    fn cdf_monotone() {
        assert!(beta_cdf(0.2, 2.0, 5.0) < beta_cdf(0.7, 2.0, 5.0));
    }

    #[test]
    fn inv_cdf_inverts_cdf() {
        let x = beta_inv_cdf(0.25, 2.0, 5.0);
        assert!(approx_eq(beta_cdf(x, 2.0, 5.0), 0.25, 1e-6));
    }

    #[test]
    fn credible_interval_brackets_mean() {
        let posterior = BetaParams::new(13.0, 57.0).unwrap();
        let (lo, hi) = posterior.credible_interval(0.95);
        assert!(lo < posterior.mean() && posterior.mean() < hi);
        assert!(approx_eq(beta_cdf(lo, 13.0, 57.0), 0.025, 1e-6));
        assert!(approx_eq(beta_cdf(hi, 13.0, 57.0), 0.975, 1e-6));
    }

    #[test]
    fn credible_interval_rejects_bad_level() {
        let (lo, hi) = BetaParams::uniform().credible_interval(1.0);
        assert!(lo.is_nan() && hi.is_nan());
    }

    #[test]
    fn log_pdf_edge_behavior_at_zero() {
        let log_pdf = log_beta_pdf(0.0, 0.5, 2.0);
        assert!(log_pdf.is_infinite() && log_pdf.is_sign_positive());

        let log_pdf2 = log_beta_pdf(0.0, 2.0, 2.0);
        assert!(log_pdf2.is_infinite() && log_pdf2.is_sign_negative());
    }
}
