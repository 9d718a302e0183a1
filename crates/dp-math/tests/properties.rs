//! Property-based tests for dp-math numerical functions.
//!
//! Uses proptest to verify mathematical properties hold across many random inputs.

use dp_math::binomial::{pmf, posterior_params};
use dp_math::{
    beta_cdf, beta_inv_cdf, beta_pdf, log_beta, log_binomial, log_factorial, log_gamma,
    log_sum_exp, normalize_log_probs, BetaParams, ProbabilityGrid,
};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-10;

/// Extended tolerance for log_gamma where Lanczos approximation has some error.
const LGAMMA_TOL: f64 = 1e-8;

/// Helper to check approximate equality.
fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() && b.is_infinite() {
        return a.signum() == b.signum();
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// log-domain primitives
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// log_sum_exp is commutative: order doesn't matter.
    #[test]
    fn log_sum_exp_commutative(a in -100.0..100.0f64, b in -100.0..100.0f64) {
        let ab = log_sum_exp(&[a, b]);
        let ba = log_sum_exp(&[b, a]);
        prop_assert!(approx_eq(ab, ba, TOL), "lse([{},{}])={} != lse([{},{}])={}", a, b, ab, b, a, ba);
    }

    /// normalize_log_probs always yields a distribution.
    #[test]
    fn normalize_log_probs_is_distribution(weights in prop::collection::vec(-800.0..50.0f64, 1..64)) {
        let probs = normalize_log_probs(&weights).unwrap();
        let total: f64 = probs.iter().sum();
        prop_assert!(approx_eq(total, 1.0, 1e-9), "sum={}", total);
        prop_assert!(probs.iter().all(|p| *p >= 0.0));
    }

    /// log_gamma recurrence: log_gamma(z+1) = log_gamma(z) + ln(z).
    #[test]
    fn log_gamma_recurrence(z in 1.0..100.0f64) {
        let lg_z1 = log_gamma(z + 1.0);
        let expected = log_gamma(z) + z.ln();
        prop_assert!(approx_eq(lg_z1, expected, LGAMMA_TOL),
            "lg({}+1)={} != {}", z, lg_z1, expected);
    }

    /// log_beta is symmetric: B(a,b) = B(b,a).
    #[test]
    fn log_beta_symmetric(a in 0.1..50.0f64, b in 0.1..50.0f64) {
        prop_assert!(approx_eq(log_beta(a, b), log_beta(b, a), LGAMMA_TOL));
    }

    /// log_binomial is symmetric: C(n,k) = C(n,n-k).
    #[test]
    fn log_binomial_symmetric(n in 1u64..50, k_frac in 0.0..1.0f64) {
        let k = ((n as f64) * k_frac) as u64;
        prop_assert!(approx_eq(log_binomial(n, k), log_binomial(n, n - k), TOL));
    }

    /// log_factorial is monotonically increasing for n > 0.
    #[test]
    fn log_factorial_monotonic(n in 1u64..99) {
        prop_assert!(log_factorial(n + 1) > log_factorial(n));
    }
}

// ============================================================================
// Beta distribution properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The density is never negative inside the open interval.
    #[test]
    fn beta_pdf_non_negative(x in 0.001..0.999f64, a in 0.05..50.0f64, b in 0.05..50.0f64) {
        let pdf = beta_pdf(x, a, b);
        prop_assert!(pdf.is_finite() && pdf >= 0.0, "pdf({};{},{})={}", x, a, b, pdf);
    }

    /// Quantile inverts the CDF.
    #[test]
    fn beta_inv_cdf_round_trips(p in 0.01..0.99f64, a in 0.5..30.0f64, b in 0.5..30.0f64) {
        let x = beta_inv_cdf(p, a, b);
        prop_assert!(approx_eq(beta_cdf(x, a, b), p, 1e-5));
    }

    /// Mean/concentration construction keeps both shapes positive and sums to the scale.
    #[test]
    fn from_mean_concentration_always_valid(mean in 0.0..=1.0f64, scale in 0.5..100.0f64) {
        let prior = BetaParams::from_mean_concentration(mean, scale, 1e-6).unwrap();
        prop_assert!(prior.alpha > 0.0 && prior.beta > 0.0);
        prop_assert!(approx_eq(prior.alpha + prior.beta, scale, 1e-9));
    }
}

// ============================================================================
// Binomial likelihood properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The PMF over all outcomes sums to one.
    #[test]
    fn binomial_pmf_sums_to_one(n in 1u64..80, p in 0.0..=1.0f64) {
        let total: f64 = (0..=n).map(|k| pmf(k, n, p)).sum();
        prop_assert!(approx_eq(total, 1.0, 1e-8), "n={} p={} total={}", n, p, total);
    }

    /// Conjugate update adds the observed counts to the shapes.
    #[test]
    fn conjugate_update_adds_counts(a in 0.1..20.0f64, b in 0.1..20.0f64, n in 1u64..100, k_frac in 0.0..=1.0f64) {
        let k = ((n as f64) * k_frac) as u64;
        let prior = BetaParams::new(a, b).unwrap();
        let post = posterior_params(&prior, k, n).unwrap();
        prop_assert!(approx_eq(post.alpha + post.beta, a + b + n as f64, 1e-9));
    }

    /// Grid endpoints are exact and spacing is uniform.
    #[test]
    fn grid_spacing_uniform(len in 2usize..2000) {
        let grid = ProbabilityGrid::linspace(len).unwrap();
        let pts = grid.points();
        prop_assert_eq!(pts[0], 0.0);
        prop_assert_eq!(pts[len - 1], 1.0);
        for w in pts.windows(2) {
            prop_assert!(approx_eq(w[1] - w[0], grid.step(), 1e-9));
        }
    }
}

// ============================================================================
// Edge case tests
// ============================================================================

#[test]
fn edge_case_empty_log_sum_exp() {
    assert!(log_sum_exp(&[]) == f64::NEG_INFINITY);
}

#[test]
fn known_values_log_binomial() {
    assert!((log_binomial(5, 2) - 10.0_f64.ln()).abs() < 1e-12);
    assert!((log_binomial(10, 5) - 252.0_f64.ln()).abs() < 1e-10);
    assert!((log_binomial(20, 10) - 184756.0_f64.ln()).abs() < 1e-8);
}
