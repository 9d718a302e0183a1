//! Dice Posterior math utilities.

pub mod math;

pub use math::beta::*;
pub use math::binomial;
pub use math::grid::ProbabilityGrid;
pub use math::stable::*;
