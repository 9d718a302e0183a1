//! Fuzz target for settings.json parsing and validation.
//!
//! Arbitrary bytes must either fail to parse, fail validation, or produce
//! settings an estimator can be built from.

#![no_main]

use dp_config::{validate_settings, Settings};
use dp_core::inference::{EstimatorConfig, PosteriorEstimator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(settings) = serde_json::from_slice::<Settings>(data) else {
        return;
    };
    if validate_settings(&settings).is_err() {
        return;
    }
    // Keep the grid small enough for libFuzzer's time budget.
    if settings.grid_points > 100_000 {
        return;
    }
    assert!(PosteriorEstimator::new(EstimatorConfig::from_settings(&settings)).is_ok());
});
