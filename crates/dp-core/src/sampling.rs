//! Random draws behind the synthetic evidence.
//!
//! Every function takes the random source as an explicit argument so a seeded
//! [`StdRng`] reproduces an estimate exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of faces on each die.
pub const DICE_FACES: u32 = 6;

/// Build the random source for one invocation.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draw a success count from Binomial(`n_trials`, `p`).
///
/// `p` is clamped into [0, 1]; NaN counts as 0.
pub fn sample_binomial<R: Rng + ?Sized>(rng: &mut R, n_trials: u32, p: f64) -> u32 {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    (0..n_trials).filter(|_| rng.random_bool(p)).count() as u32
}

/// Roll `n_dice` fair dice and return the total.
pub fn roll_sum<R: Rng + ?Sized>(rng: &mut R, n_dice: u32) -> u32 {
    (0..n_dice).map(|_| rng.random_range(1..=DICE_FACES)).sum()
}

/// Monte Carlo estimate of P(sum of `n_dice` dice >= `threshold`).
pub fn fraction_sum_at_least<R: Rng + ?Sized>(
    rng: &mut R,
    n_dice: u32,
    threshold: u32,
    samples: usize,
) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let hits = (0..samples)
        .filter(|_| roll_sum(rng, n_dice) >= threshold)
        .count();
    hits as f64 / samples as f64
}
