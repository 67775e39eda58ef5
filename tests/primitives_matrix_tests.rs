#![cfg(feature = "dev")]
//! Tests for the row-major matrix type.

use effective_attention::internals::primitives::errors::AttentionError;
use effective_attention::internals::primitives::matrix::Matrix;

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_from_rows_layout() {
    let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    assert_eq!(m[(0, 2)], 3.0);
}

#[test]
fn test_from_rows_ragged() {
    let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
    let err = Matrix::from_rows(&rows).unwrap_err();
    assert!(matches!(err, AttentionError::InvalidShape { rows: 2, cols: 2, .. }));
}

#[test]
fn test_from_vec_length_mismatch() {
    let err = Matrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
    assert_eq!(
        err,
        AttentionError::InvalidShape {
            rows: 2,
            cols: 2,
            expected: 4,
            got: 3,
        }
    );
}

#[test]
fn test_zero_width_matrix() {
    let m = Matrix::<f64>::zeros(4, 0);
    assert_eq!(m.shape(), (4, 0));
    assert!(m.is_empty());
    assert_eq!(m.transpose().shape(), (0, 4));
    assert_eq!(m.row_iter().count(), 4);
}

#[test]
fn test_identity() {
    let m = Matrix::<f64>::identity(3);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(m[(i, j)], if i == j { 1.0 } else { 0.0 });
        }
    }
}

// ============================================================================
// Operation Tests
// ============================================================================

#[test]
fn test_transpose() {
    let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(t.transpose(), m);
}

#[test]
fn test_lower_triangular_rectangular() {
    let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let lower = m.lower_triangular();
    assert_eq!(lower.as_slice(), &[1.0, 0.0, 0.0, 4.0, 5.0, 0.0]);
}

#[test]
fn test_map_and_finite() {
    let m = Matrix::from_rows(&[[1.0, -2.0]]).unwrap();
    assert_eq!(m.map(|v: f64| v.abs()).as_slice(), &[1.0, 2.0]);
    assert!(m.is_finite());
    assert!(!m.map(|v| v / 0.0).is_finite());
}

#[test]
fn test_approx_eq() {
    let a = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
    let b = Matrix::from_rows(&[[1.0 + 1e-10, 2.0]]).unwrap();
    assert!(a.approx_eq(&b, 1e-9));
    assert!(!a.approx_eq(&b, 1e-11));
    assert!(!a.approx_eq(&a.transpose(), 1.0));
}

#[test]
fn test_cast_round_trip_precision() {
    let m = Matrix::from_rows(&[[0.5f64, 0.25], [1.0, -2.0]]).unwrap();
    let single: Matrix<f32> = m.cast().unwrap();
    assert_eq!(single.as_slice(), &[0.5f32, 0.25, 1.0, -2.0]);
    assert_eq!(single.cast::<f64>().unwrap(), m);
}

#[test]
fn test_get_and_into_vec() {
    let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(m.get(1, 0), Some(&3.0));
    assert_eq!(m.get(2, 0), None);
    assert_eq!(m.get(0, 2), None);
    assert_eq!(m.into_vec(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_index_out_of_bounds() {
    let m = Matrix::<f64>::zeros(2, 2);
    let _ = m[(0, 2)];
}
