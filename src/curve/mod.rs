//! Curve math: recall-level interpolation, trapezoidal AUC, and curve averaging.

pub mod auc;
pub mod average;
pub mod interpolate;

pub use auc::auc;
pub use average::average_curves;
pub use interpolate::{
    interpolate, recall_levels, InterpolationMethod, DEFAULT_RECALL_LEVELS, MAX_RECALL_LEVELS,
};

use serde::Serialize;

/// Precision sampled at fixed recall levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolatedCurve {
    pub recall: Vec<f64>,
    pub precision: Vec<f64>,
}

impl InterpolatedCurve {
    pub fn len(&self) -> usize {
        self.recall.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recall.is_empty()
    }

    /// Arithmetic mean of the interpolated precisions (TREC-style N-point AP).
    pub fn mean_precision(&self) -> f64 {
        if self.precision.is_empty() {
            return 0.0;
        }
        self.precision.iter().sum::<f64>() / self.precision.len() as f64
    }

    /// Area under the interpolated curve.
    pub fn area(&self) -> crate::Result<f64> {
        auc(&self.recall, &self.precision)
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.recall
            .iter()
            .copied()
            .zip(self.precision.iter().copied())
            .collect()
    }
}
