//! Orthogonal projection operators.
//!
//! ## Purpose
//!
//! This module builds the orthogonal projector onto the column space of a
//! matrix `A` (`n x k`):
//!
//! ```text
//! P = A (AᵗA)⁺ Aᵗ
//! ```
//!
//! where `⁺` is the Moore-Penrose pseudo-inverse. It also composes the
//! projector onto the null space of `Aᵗ`.
//!
//! ## Design notes
//!
//! * **Pseudo-inverse**: Keeps `P` well-defined when `AᵗA` is singular.
//!   Singular values of `AᵗA` below `ε * k * s_max` are dropped.
//! * **Zero columns**: `k = 0` yields the `n x n` zero matrix.
//!
//! ## Invariants
//!
//! * `P = Pᵗ` and `P² = P` within floating-point tolerance.

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::math::nullspace::{NullSpace, cast_usize, nullspace_in};
use crate::primitives::errors::{AttentionError, FailureCause};
use crate::primitives::matrix::Matrix;

/// Projector onto the column space of `a`, computed in precision `W`.
pub fn projection_in<W: FloatLinalg>(
    a: &Matrix<W>,
    max_iter: usize,
) -> Result<Matrix<W>, AttentionError> {
    let (n, k) = a.shape();

    if !a.is_finite() {
        return Err(AttentionError::DecompositionFailure {
            rows: n,
            cols: k,
            cause: FailureCause::NonFiniteInput,
        });
    }

    let rcond = W::epsilon() * cast_usize::<W>(k.max(1));
    let data = W::projection(a.as_slice(), n, k, rcond, max_iter).ok_or(
        AttentionError::DecompositionFailure {
            rows: k,
            cols: k,
            cause: FailureCause::NotConverged,
        },
    )?;

    Matrix::from_vec(n, n, data)
}

/// Projector onto the null space of `matrixᵗ`, computed in precision `W`.
///
/// Returns `Ok(None)` when that null space is trivial.
pub fn nullspace_projection_in<W: FloatLinalg>(
    matrix: &Matrix<W>,
    rcond: Option<W>,
    max_iter: usize,
) -> Result<Option<Matrix<W>>, AttentionError> {
    match nullspace_in(&matrix.transpose(), rcond, max_iter)? {
        NullSpace::Trivial { .. } => Ok(None),
        NullSpace::Basis { basis, .. } => projection_in(&basis, max_iter).map(Some),
    }
}

