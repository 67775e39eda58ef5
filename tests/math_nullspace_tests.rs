#![cfg(feature = "dev")]
//! Tests for SVD-based null space computation.
//!
//! These tests verify:
//! - Rank determination with the machine-precision tolerance
//! - Orthonormality and correctness of the returned basis
//! - The distinction between a trivial null space and a failed decomposition
//!
//! ## Test Organization
//!
//! 1. **Full Rank** - Trivial null spaces
//! 2. **Rank Deficient** - Known null vectors
//! 3. **Edge Cases** - Empty, zero, and non-finite inputs
//! 4. **Tolerance** - `rcond` overrides

use approx::assert_abs_diff_eq;
use rand::prelude::*;

use effective_attention::internals::math::nullspace::{NullSpace, nullspace_in};
use effective_attention::internals::primitives::errors::{AttentionError, FailureCause};
use effective_attention::internals::primitives::matrix::Matrix;

const MAX_ITER: usize = 10_000;

fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..rows * cols)
        .map(|_| rng.random_range(-1.0..1.0))
        .collect();
    Matrix::from_vec(rows, cols, data).unwrap()
}

fn matmul(a: &Matrix<f64>, b: &Matrix<f64>) -> Matrix<f64> {
    let mut data = vec![0.0; a.rows() * b.cols()];
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            data[i * b.cols() + j] = (0..a.cols()).map(|k| a[(i, k)] * b[(k, j)]).sum();
        }
    }
    Matrix::from_vec(a.rows(), b.cols(), data).unwrap()
}

fn max_abs(m: &Matrix<f64>) -> f64 {
    m.as_slice().iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

fn assert_orthonormal_columns(basis: &Matrix<f64>) {
    let gram = matmul(&basis.transpose(), basis);
    let identity = Matrix::identity(basis.cols());
    assert!(
        gram.approx_eq(&identity, 1e-10),
        "basis columns are not orthonormal: {:?}",
        gram
    );
}

// ============================================================================
// Full Rank Tests
// ============================================================================

/// A random square matrix has full rank and no null space.
#[test]
fn test_full_rank_square_is_trivial() {
    let a = random_matrix(5, 5, 7);
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();

    assert!(ns.is_trivial());
    assert_eq!(ns.rank(), 5);
    assert_eq!(ns.nullity(), 0);
    assert_eq!(ns.basis().shape(), (5, 0));
}

/// A tall matrix with independent columns has no null space.
#[test]
fn test_full_column_rank_tall_is_trivial() {
    let a = random_matrix(8, 3, 11);
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();

    assert_eq!(ns, NullSpace::Trivial { dim: 3 });
}

/// The identity has no null space.
#[test]
fn test_identity_is_trivial() {
    let ns = nullspace_in(&Matrix::<f64>::identity(4), None, MAX_ITER).unwrap();
    assert!(ns.is_trivial());
}

// ============================================================================
// Rank Deficient Tests
// ============================================================================

/// `A = B C` with `C v = 0` has `v` in its null space.
#[test]
fn test_product_with_known_null_vector() {
    let norm = (1.0f64 + 1.0 + 4.0).sqrt();
    let v = [1.0 / norm, -1.0 / norm, 2.0 / norm, 0.0];

    // Remove the v-component from every row of a random C.
    let c_raw = random_matrix(3, 4, 21);
    let mut c_data = Vec::with_capacity(12);
    for row in c_raw.row_iter() {
        let dot: f64 = row.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
        c_data.extend(row.iter().zip(v.iter()).map(|(a, b)| a - dot * b));
    }
    let c = Matrix::from_vec(3, 4, c_data).unwrap();
    let b = random_matrix(5, 3, 22);
    let a = matmul(&b, &c);

    // A v ≈ 0
    let v_col = Matrix::from_row_slice(4, 1, &v).unwrap();
    assert!(max_abs(&matmul(&a, &v_col)) < 1e-12);

    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();
    assert_eq!(ns.rank(), 3);
    assert_eq!(ns.nullity(), 1);

    let basis = ns.basis();
    assert_orthonormal_columns(&basis);

    // v lies in span(basis): ‖B Bᵗ v - v‖ ≈ 0
    let proj = matmul(&basis, &matmul(&basis.transpose(), &v_col));
    for i in 0..4 {
        assert_abs_diff_eq!(proj[(i, 0)], v[i], epsilon = 1e-10);
    }
}

/// Two identical rows leave one direction unseen.
#[test]
fn test_duplicate_rows_transpose() {
    // valueᵗ for value = [[1, 0], [1, 0]]
    let value = Matrix::<f64>::from_rows(&[[1.0, 0.0], [1.0, 0.0]]).unwrap();
    let ns = nullspace_in(&value.transpose(), None, MAX_ITER).unwrap();

    assert_eq!(ns.rank(), 1);
    let basis = ns.basis();
    assert_eq!(basis.shape(), (2, 1));

    // Basis is ±(1, -1)/√2
    let half_sqrt2 = 0.5f64.sqrt();
    assert_abs_diff_eq!(basis[(0, 0)].abs(), half_sqrt2, epsilon = 1e-12);
    assert_abs_diff_eq!(basis[(0, 0)] + basis[(1, 0)], 0.0, epsilon = 1e-12);
}

/// A wide matrix always has a null space of dimension `n - rank`.
#[test]
fn test_wide_matrix_nullity() {
    let a = random_matrix(2, 5, 31);
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();

    assert_eq!(ns.rank(), 2);
    assert_eq!(ns.nullity(), 3);

    let basis = ns.basis();
    assert_eq!(basis.shape(), (5, 3));
    assert_orthonormal_columns(&basis);
    assert!(max_abs(&matmul(&a, &basis)) < 1e-12);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

/// The zero matrix maps everything to zero.
#[test]
fn test_zero_matrix_full_null_space() {
    let a = Matrix::<f64>::zeros(3, 3);
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();

    assert_eq!(ns.rank(), 0);
    assert_eq!(ns.nullity(), 3);
    assert_orthonormal_columns(&ns.basis());
}

/// A matrix without columns has a trivial null space.
#[test]
fn test_zero_columns() {
    let a = Matrix::<f64>::zeros(3, 0);
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();
    assert_eq!(ns, NullSpace::Trivial { dim: 0 });
}

/// A matrix without rows has the whole space as null space.
#[test]
fn test_zero_rows() {
    let a = Matrix::<f64>::zeros(0, 3);
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();
    assert_eq!(ns.rank(), 0);
    assert_eq!(ns.basis(), Matrix::identity(3));
}

/// NaN input is a decomposition failure, not an empty null space.
#[test]
fn test_nan_is_decomposition_failure() {
    let a = Matrix::from_rows(&[[1.0, f64::NAN], [0.0, 1.0]]).unwrap();
    let err = nullspace_in(&a, None, MAX_ITER).unwrap_err();

    assert_eq!(
        err,
        AttentionError::DecompositionFailure {
            rows: 2,
            cols: 2,
            cause: FailureCause::NonFiniteInput,
        }
    );
    assert!(err.is_decomposition_failure());
}

/// Infinite input is rejected the same way.
#[test]
fn test_infinity_is_decomposition_failure() {
    let a = Matrix::from_rows(&[[f64::INFINITY, 0.0]]).unwrap();
    let err = nullspace_in(&a, None, MAX_ITER).unwrap_err();
    assert!(err.is_decomposition_failure());
}

// ============================================================================
// Tolerance Tests
// ============================================================================

/// A small singular value counts toward the rank by default but not with a
/// looser tolerance.
#[test]
fn test_rcond_override() {
    let a = Matrix::<f64>::from_rows(&[[1.0, 0.0], [0.0, 1e-3]]).unwrap();

    let default = nullspace_in(&a, None, MAX_ITER).unwrap();
    assert!(default.is_trivial());

    let loose = nullspace_in(&a, Some(1e-2), MAX_ITER).unwrap();
    assert_eq!(loose.rank(), 1);
    let basis = loose.basis();
    assert_abs_diff_eq!(basis[(0, 0)], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(basis[(1, 0)].abs(), 1.0, epsilon = 1e-12);
}

/// Single precision works on exactly representable input.
#[test]
fn test_single_precision() {
    let a = Matrix::from_rows(&[[1.0f32, 1.0], [0.0, 0.0]]).unwrap();
    let ns = nullspace_in(&a, None, MAX_ITER).unwrap();
    assert_eq!(ns.nullity(), 1);

    let cast = ns.cast::<f64>().unwrap();
    assert_eq!(cast.rank(), 1);
}
