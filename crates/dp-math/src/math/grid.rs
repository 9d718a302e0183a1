//! Evenly spaced discretization of the unit interval.

use serde::{Deserialize, Serialize};

/// Candidate values of an unknown probability, evenly spaced over [0, 1]
/// with both endpoints included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityGrid {
    points: Vec<f64>,
}

impl ProbabilityGrid {
    /// Build a grid of `len` points. Returns None when `len < 2`.
    pub fn linspace(len: usize) -> Option<Self> {
        if len < 2 {
            return None;
        }
        let last = (len - 1) as f64;
        let points = (0..len)
            .map(|i| if i == len - 1 { 1.0 } else { i as f64 / last })
            .collect();
        Some(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance between neighbouring points.
    pub fn step(&self) -> f64 {
        1.0 / (self.points.len() - 1) as f64
    }
}
