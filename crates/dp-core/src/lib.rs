//! Dice Posterior core library.
//!
//! Bayesian estimation of a per-trial success probability for dice events
//! and a fixed coin-flip scenario: Beta prior, Binomial likelihood, grid
//! posterior, SVG figure and structured report.

pub mod config;
pub mod exit_codes;
pub mod inference;
pub mod logging;
pub mod render;
pub mod sampling;
pub mod scenario;
pub mod schema;
pub mod selection;

pub use exit_codes::ExitCode;
pub use inference::{EstimatorConfig, PosteriorEstimator, TrialOutcome};
pub use scenario::{CoinScenario, DiceEvent};
