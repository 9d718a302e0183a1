//! Posterior inference over a probability grid.

pub mod estimator;
pub mod posterior;

pub use estimator::{Estimate, EstimatorConfig, EventEstimate, PosteriorEstimator};
pub use posterior::{
    grid_posterior, scale_to_max, ConjugatePosterior, CredibleInterval, DensityCurves,
    DisplayCurves, PosteriorSummary, TrialOutcome,
};
