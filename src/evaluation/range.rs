//! Finite value ranges for color-scale normalization.
//!
//! ## Purpose
//!
//! A heatmap renderer maps each matrix onto a color scale between its
//! minimum and maximum. This module computes that range while skipping
//! non-finite entries, which would otherwise poison the scale.
//!
//! ## Invariants
//!
//! * `min <= max` whenever a range exists.
//! * A matrix with no finite entry has no range.

// External dependencies
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::primitives::matrix::Matrix;

/// Closed interval of finite values found in a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange<T> {
    /// Smallest finite entry.
    pub min: T,
    /// Largest finite entry.
    pub max: T,
}

impl<T: Float> ValueRange<T> {
    /// `max - min`.
    pub fn span(&self) -> T {
        self.max - self.min
    }
}

/// Finite minimum and maximum of `m`, or `None` if no entry is finite.
pub fn finite_range<T: Float>(m: &Matrix<T>) -> Option<ValueRange<T>> {
    m.as_slice()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some(ValueRange { min: v, max: v }),
            Some(r) => Some(ValueRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
}
