//! Value-norm weighting of attention.
//!
//! ## Purpose
//!
//! This module rescales attention by the magnitude of the value vector each
//! weight points at, then renormalizes every row to sum to one:
//!
//! ```text
//! scaled[i, j] = attn[i, j] * ‖value[j, :]‖₂
//! result[i, :] = scaled[i, :] / Σⱼ scaled[i, j]
//! ```
//!
//! ## Invariants
//!
//! * Every output row sums to one.
//!
//! ## Non-goals
//!
//! * This module does not validate shapes (see `engine::validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::AttentionError;
use crate::primitives::matrix::Matrix;

/// Euclidean norm of every row.
///
/// Accumulated with `hypot`, so finite rows never overflow to infinity.
pub fn row_norms<T: Float>(m: &Matrix<T>) -> Vec<T> {
    m.row_iter()
        .map(|row| row.iter().fold(T::zero(), |acc, &v| acc.hypot(v)))
        .collect()
}

/// Weight attention columns by value-vector norms and renormalize rows.
///
/// Fails with `DegenerateRow` when a row's scaled sum is zero or not finite.
pub fn weight_by_value_norm_in<T: Float>(
    attn: &Matrix<T>,
    value: &Matrix<T>,
) -> Result<Matrix<T>, AttentionError> {
    let norms = row_norms(value);
    let (rows, cols) = attn.shape();
    let mut data = Vec::with_capacity(rows * cols);

    for (i, row) in attn.row_iter().enumerate() {
        let start = data.len();
        data.extend(row.iter().zip(norms.iter()).map(|(&a, &n)| a * n));

        let sum = data[start..].iter().fold(T::zero(), |acc, &v| acc + v);
        if sum == T::zero() || !sum.is_finite() {
            return Err(AttentionError::DegenerateRow { row: i });
        }

        for v in &mut data[start..] {
            *v = *v / sum;
        }
    }

    Matrix::from_vec(rows, cols, data)
}
