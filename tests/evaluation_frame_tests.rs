#![cfg(feature = "dev")]
//! Tests for the renderer payload.
//!
//! These tests verify:
//! - Finite value ranges that skip NaN and infinities
//! - Shape, label and token count validation of heatmap frames
//! - JSON serialization of a frame

use approx::assert_abs_diff_eq;

use effective_attention::internals::evaluation::frame::HeatmapFrame;
use effective_attention::internals::evaluation::range::{ValueRange, finite_range};
use effective_attention::internals::primitives::errors::AttentionError;
use effective_attention::internals::primitives::matrix::Matrix;

fn tokens(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("tok{}", i)).collect()
}

// ============================================================================
// Value Range Tests
// ============================================================================

#[test]
fn test_finite_range_basic() {
    let m = Matrix::from_rows(&[[0.1, -0.4], [0.9, 0.0]]).unwrap();
    let range = finite_range(&m).unwrap();
    assert_eq!(range, ValueRange { min: -0.4, max: 0.9 });
    assert_abs_diff_eq!(range.span(), 1.3, epsilon = 1e-12);
}

#[test]
fn test_finite_range_skips_non_finite() {
    let m = Matrix::from_rows(&[
        [f64::NAN, 0.2, f64::INFINITY],
        [f64::NEG_INFINITY, 0.7, 0.3],
    ])
    .unwrap();
    let range = finite_range(&m).unwrap();
    assert_eq!(range.min, 0.2);
    assert_eq!(range.max, 0.7);
}

#[test]
fn test_finite_range_none() {
    let m = Matrix::from_rows(&[[f64::NAN, f64::INFINITY]]).unwrap();
    assert!(finite_range(&m).is_none());
    assert!(finite_range(&Matrix::<f64>::zeros(0, 0)).is_none());
}

// ============================================================================
// Frame Construction Tests
// ============================================================================

#[test]
fn test_frame_new() {
    let a = Matrix::from_rows(&[[1.0, 0.0], [0.5, 0.5]]).unwrap();
    let b = Matrix::from_rows(&[[0.2, 0.0], [0.0, 0.4]]).unwrap();

    let frame = HeatmapFrame::new(
        vec![a.clone(), b],
        vec!["L0H0".to_string(), "L0H1".to_string()],
        tokens(2),
    )
    .unwrap();

    assert_eq!(frame.len(), 2);
    assert!(!frame.is_empty());
    assert_eq!(frame.matrices()[0], a);
    assert_eq!(frame.labels()[1], "L0H1");
    assert_eq!(frame.tokens(), &["tok0".to_string(), "tok1".to_string()]);
    assert_eq!(frame.ranges()[0], Some(ValueRange { min: 0.0, max: 1.0 }));
    assert_eq!(frame.ranges()[1], Some(ValueRange { min: 0.0, max: 0.4 }));
}

#[test]
fn test_frame_empty() {
    let err = HeatmapFrame::<f64>::new(vec![], vec![], vec![]).unwrap_err();
    assert_eq!(err, AttentionError::EmptyInput);
}

#[test]
fn test_frame_shape_mismatch() {
    let err = HeatmapFrame::new(
        vec![Matrix::<f64>::zeros(3, 3), Matrix::zeros(3, 2)],
        vec!["a".to_string(), "b".to_string()],
        tokens(3),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AttentionError::FrameShapeMismatch {
            index: 1,
            expected: (3, 3),
            got: (3, 2),
        }
    );
}

#[test]
fn test_frame_label_mismatch() {
    let err = HeatmapFrame::new(
        vec![Matrix::<f64>::zeros(2, 2), Matrix::zeros(2, 2)],
        vec!["only".to_string()],
        tokens(2),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AttentionError::MismatchedLabels {
            matrices: 2,
            labels: 1,
        }
    );
}

#[test]
fn test_frame_token_mismatch() {
    let err = HeatmapFrame::new(
        vec![Matrix::<f64>::zeros(2, 2)],
        vec!["L0H0".to_string()],
        tokens(3),
    )
    .unwrap_err();
    assert_eq!(err, AttentionError::MismatchedTokens { tokens: 3, rows: 2 });
}

/// A matrix with no finite entry still renders; it just has no range.
#[test]
fn test_frame_all_nan_matrix() {
    let nan = Matrix::from_rows(&[[f64::NAN]]).unwrap();
    let frame = HeatmapFrame::new(vec![nan], vec!["x".to_string()], tokens(1)).unwrap();
    assert_eq!(frame.ranges(), &[None]);
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_frame_serializes_to_json() {
    let m = Matrix::from_rows(&[[1.0, 0.0], [0.25, 0.75]]).unwrap();
    let frame = HeatmapFrame::new(vec![m], vec!["L1H2".to_string()], tokens(2)).unwrap();

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["labels"][0], "L1H2");
    assert_eq!(json["tokens"][1], "tok1");
    assert_eq!(json["matrices"][0]["rows"], 2);
    assert_eq!(json["matrices"][0]["cols"], 2);
    assert_eq!(json["matrices"][0]["data"][2], 0.25);
    assert_eq!(json["ranges"][0]["min"], 0.0);
    assert_eq!(json["ranges"][0]["max"], 1.0);
}
