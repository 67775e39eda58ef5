//! Linear algebra backend abstraction for attention decomposition.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the decompositions
//! the crate needs, standardizing on the nalgebra backend:
//! - Full right-singular basis via SVD
//! - Orthogonal projection through a pseudo-inverse
//! - Dense products
//!
//! ## Design notes
//!
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.
//! * SVD runs with a bounded iteration count; non-convergence is `None`.
//! * Buffers crossing this boundary are row-major; nalgebra storage is
//!   column-major, so conversions go through a transpose.
//! * Wide inputs (`rows < cols`) are zero-padded to square so that the full
//!   `cols x cols` right-singular basis is available. Padding only adds zero
//!   singular values.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// SVD Parts
// ============================================================================

/// The parts of a singular value decomposition used for rank determination.
#[derive(Debug, Clone, PartialEq)]
pub struct SvdParts<T> {
    /// Singular values, sorted descending, length `min(rows, cols)`.
    pub singular_values: Vec<T>,

    /// Right-singular vectors stored as rows (`Vᵗ`), `cols x cols`, row-major.
    /// Row `i` pairs with singular value `i`; rows past `min(rows, cols)`
    /// pair with an implicit zero singular value.
    pub v_t: Vec<T>,
}

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Compute singular values and the full right-singular basis of a
    /// row-major `rows x cols` matrix.
    fn full_svd(a: &[Self], rows: usize, cols: usize, max_iter: usize) -> Option<SvdParts<Self>>;

    /// Compute `A pinv(AᵗA) Aᵗ` for a row-major `rows x cols` matrix.
    ///
    /// Singular values of `AᵗA` below `rcond * s_max` are treated as zero.
    fn projection(
        a: &[Self],
        rows: usize,
        cols: usize,
        rcond: Self,
        max_iter: usize,
    ) -> Option<Vec<Self>>;

    /// Compute `A Bᵗ` for row-major `A` (`m x k`) and `B` (`n x k`).
    fn mul_transpose(a: &[Self], m: usize, b: &[Self], n: usize, k: usize) -> Vec<Self>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn full_svd(a: &[Self], rows: usize, cols: usize, max_iter: usize) -> Option<SvdParts<Self>> {
        nalgebra_backend::full_svd(a, rows, cols, f64::EPSILON, max_iter)
    }
    #[inline]
    fn projection(
        a: &[Self],
        rows: usize,
        cols: usize,
        rcond: Self,
        max_iter: usize,
    ) -> Option<Vec<Self>> {
        nalgebra_backend::projection(a, rows, cols, rcond, f64::EPSILON, max_iter)
    }
    #[inline]
    fn mul_transpose(a: &[Self], m: usize, b: &[Self], n: usize, k: usize) -> Vec<Self> {
        nalgebra_backend::mul_transpose(a, m, b, n, k)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn full_svd(a: &[Self], rows: usize, cols: usize, max_iter: usize) -> Option<SvdParts<Self>> {
        nalgebra_backend::full_svd(a, rows, cols, f32::EPSILON, max_iter)
    }
    #[inline]
    fn projection(
        a: &[Self],
        rows: usize,
        cols: usize,
        rcond: Self,
        max_iter: usize,
    ) -> Option<Vec<Self>> {
        nalgebra_backend::projection(a, rows, cols, rcond, f32::EPSILON, max_iter)
    }
    #[inline]
    fn mul_transpose(a: &[Self], m: usize, b: &[Self], n: usize, k: usize) -> Vec<Self> {
        nalgebra_backend::mul_transpose(a, m, b, n, k)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    #[cfg(not(feature = "std"))]
    use alloc::vec::Vec;
    #[cfg(feature = "std")]
    use std::vec::Vec;

    use super::SvdParts;
    use core::cmp::Ordering;
    use nalgebra::{DMatrix, RealField};

    /// Copy a column-major nalgebra matrix into a row-major buffer.
    fn to_row_major<R: RealField + Copy>(m: &DMatrix<R>) -> Vec<R> {
        m.transpose().as_slice().to_vec()
    }

    /// Full SVD returning descending singular values and the complete `Vᵗ`.
    pub fn full_svd<R: RealField + Copy>(
        a: &[R],
        rows: usize,
        cols: usize,
        eps: R,
        max_iter: usize,
    ) -> Option<SvdParts<R>> {
        let matrix = if rows < cols {
            let mut padded = DMatrix::<R>::zeros(cols, cols);
            for i in 0..rows {
                for j in 0..cols {
                    padded[(i, j)] = a[i * cols + j];
                }
            }
            padded
        } else {
            DMatrix::from_row_slice(rows, cols, a)
        };

        let svd = matrix.try_svd(false, true, eps, max_iter)?;
        let v_t = svd.v_t?;
        let sv = svd.singular_values;

        // Enforce descending order regardless of backend ordering.
        let mut order: Vec<usize> = (0..sv.len()).collect();
        order.sort_by(|&i, &j| sv[j].partial_cmp(&sv[i]).unwrap_or(Ordering::Equal));

        let singular_values = order.iter().take(rows.min(cols)).map(|&i| sv[i]).collect();

        let mut sorted_v_t = Vec::with_capacity(cols * cols);
        for &i in &order {
            for j in 0..cols {
                sorted_v_t.push(v_t[(i, j)]);
            }
        }

        Some(SvdParts {
            singular_values,
            v_t: sorted_v_t,
        })
    }

    /// Orthogonal projection `A pinv(AᵗA) Aᵗ` onto the column space of `A`.
    pub fn projection<R: RealField + Copy>(
        a: &[R],
        rows: usize,
        cols: usize,
        rcond: R,
        eps: R,
        max_iter: usize,
    ) -> Option<Vec<R>> {
        if rows == 0 || cols == 0 {
            return Some(vec![R::zero(); rows * rows]);
        }

        let a = DMatrix::from_row_slice(rows, cols, a);
        let gram = a.transpose() * &a;

        let svd = gram.try_svd(true, true, eps, max_iter)?;
        let s_max = svd
            .singular_values
            .iter()
            .fold(R::zero(), |acc, &s| if s > acc { s } else { acc });

        let pinv = svd.pseudo_inverse(s_max * rcond).ok()?;
        let p = &a * pinv * a.transpose();

        Some(to_row_major(&p))
    }

    /// Dense product `A Bᵗ`.
    pub fn mul_transpose<R: RealField + Copy>(
        a: &[R],
        m: usize,
        b: &[R],
        n: usize,
        k: usize,
    ) -> Vec<R> {
        let a = DMatrix::from_row_slice(m, k, a);
        let b = DMatrix::from_row_slice(n, k, b);
        to_row_major(&(a * b.transpose()))
    }
}
