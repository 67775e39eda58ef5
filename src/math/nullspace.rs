//! Numerically stable null space via singular value decomposition.
//!
//! ## Purpose
//!
//! This module computes an orthonormal basis for the null space of a matrix
//! `A` (`m x n`): the right-singular vectors whose singular values fall at or
//! below a rank tolerance.
//!
//! ## Design notes
//!
//! * **Tolerance**: `threshold = s_max * rcond`, with `rcond = ε * max(m, n)`
//!   unless overridden. `ε` is the epsilon of the working precision.
//! * **Rank**: The count of singular values strictly greater than `threshold`.
//! * **Three outcomes**: A basis, a trivial null space, or a
//!   `DecompositionFailure` error. The first two are `Ok`.
//!
//! ## Invariants
//!
//! * The basis is `n x (n - rank)` with orthonormal columns.
//! * `A v ≈ 0` for every basis column `v`.
//!
//! ## Non-goals
//!
//! * This module does not support complex matrices.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::{debug, trace};

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::{AttentionError, FailureCause};
use crate::primitives::matrix::Matrix;

// ============================================================================
// Null Space Result
// ============================================================================

/// Outcome of a successful null-space computation.
#[derive(Debug, Clone, PartialEq)]
pub enum NullSpace<T> {
    /// A non-trivial null space.
    Basis {
        /// `n x (n - rank)` matrix with orthonormal columns.
        basis: Matrix<T>,
        /// Numerical rank of the input.
        rank: usize,
    },

    /// Only the zero vector maps to zero (full column rank).
    Trivial {
        /// Column count `n` of the input (equal to its rank).
        dim: usize,
    },
}

impl<T: Float> NullSpace<T> {
    /// Numerical rank of the decomposed matrix.
    pub fn rank(&self) -> usize {
        match self {
            NullSpace::Basis { rank, .. } => *rank,
            NullSpace::Trivial { dim } => *dim,
        }
    }

    /// Dimension of the null space.
    pub fn nullity(&self) -> usize {
        match self {
            NullSpace::Basis { basis, .. } => basis.cols(),
            NullSpace::Trivial { .. } => 0,
        }
    }

    /// Whether the null space contains only the zero vector.
    pub fn is_trivial(&self) -> bool {
        matches!(self, NullSpace::Trivial { .. })
    }

    /// The basis matrix; `n x 0` for a trivial null space.
    pub fn basis(&self) -> Matrix<T> {
        match self {
            NullSpace::Basis { basis, .. } => basis.clone(),
            NullSpace::Trivial { dim } => Matrix::zeros(*dim, 0),
        }
    }

    /// Convert the basis to another float type.
    pub fn cast<U: Float>(&self) -> Result<NullSpace<U>, AttentionError> {
        Ok(match self {
            NullSpace::Basis { basis, rank } => NullSpace::Basis {
                basis: basis.cast::<U>()?,
                rank: *rank,
            },
            NullSpace::Trivial { dim } => NullSpace::Trivial { dim: *dim },
        })
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Compute the null space of `a` in its own precision `W`.
///
/// `rcond` overrides the relative tolerance; `None` selects `ε(W) * max(m, n)`.
pub fn nullspace_in<W: FloatLinalg>(
    a: &Matrix<W>,
    rcond: Option<W>,
    max_iter: usize,
) -> Result<NullSpace<W>, AttentionError> {
    let (m, n) = a.shape();

    if !a.is_finite() {
        return Err(AttentionError::DecompositionFailure {
            rows: m,
            cols: n,
            cause: FailureCause::NonFiniteInput,
        });
    }

    if n == 0 {
        return Ok(NullSpace::Trivial { dim: 0 });
    }
    if m == 0 {
        // No equations: every vector is in the null space.
        return Ok(NullSpace::Basis {
            basis: Matrix::identity(n),
            rank: 0,
        });
    }

    let parts = W::full_svd(a.as_slice(), m, n, max_iter).ok_or(
        AttentionError::DecompositionFailure {
            rows: m,
            cols: n,
            cause: FailureCause::NotConverged,
        },
    )?;

    let rcond = rcond.unwrap_or_else(|| W::epsilon() * cast_usize::<W>(m.max(n)));
    let s_max = parts
        .singular_values
        .iter()
        .fold(W::zero(), |acc, &s| acc.max(s));
    let threshold = s_max * rcond;
    let rank = parts
        .singular_values
        .iter()
        .filter(|&&s| s > threshold)
        .count();

    debug!(
        rows = m,
        cols = n,
        rank,
        nullity = n - rank,
        threshold = threshold.to_f64().unwrap_or(f64::NAN),
        "null space computed"
    );

    if rank == n {
        return Ok(NullSpace::Trivial { dim: n });
    }

    // Trailing rows of Vᵗ are the null vectors; lay them out as columns.
    let nullity = n - rank;
    let mut data = Vec::with_capacity(n * nullity);
    for i in 0..n {
        for k in rank..n {
            data.push(parts.v_t[k * n + i]);
        }
    }
    let basis = Matrix::from_vec(n, nullity, data)?;
    trace!(shape = ?basis.shape(), "null space basis");

    Ok(NullSpace::Basis { basis, rank })
}

/// Convert a dimension to the working float type.
#[inline]
pub(crate) fn cast_usize<W: Float>(n: usize) -> W {
    W::from(n).unwrap_or_else(W::max_value)
}
