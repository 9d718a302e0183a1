//! Fuzz target for the grid posterior.
//!
//! Any positive prior and valid outcome must give a finite posterior that
//! sums to 1.

#![no_main]

use arbitrary::Arbitrary;
use dp_core::inference::{grid_posterior, TrialOutcome};
use dp_math::{BetaParams, ProbabilityGrid};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    alpha: f64,
    beta: f64,
    n_trials: u16,
    successes: u16,
    grid_points: u16,
}

fuzz_target!(|input: Input| {
    let Some(prior) = BetaParams::new(input.alpha, input.beta) else {
        return;
    };
    let Ok(outcome) = TrialOutcome::new(u64::from(input.n_trials), u64::from(input.successes))
    else {
        return;
    };
    let Some(grid) = ProbabilityGrid::linspace(usize::from(input.grid_points)) else {
        return;
    };
    if let Ok(curves) = grid_posterior(&grid, &prior, &outcome) {
        let total: f64 = curves.posterior.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
});
