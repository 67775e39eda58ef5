//! Heatmap payload handed to a downstream renderer.
//!
//! ## Purpose
//!
//! This module assembles everything a matrix heatmap viewer consumes:
//! a sequence of equally shaped matrices, one label per matrix, one token per
//! sequence position, and the finite value range of each matrix.
//!
//! ## Design notes
//!
//! * **Validated once**: Shapes, label and token counts are checked at
//!   construction; a built frame is always consistent.
//! * **Serializable**: Derives `serde::Serialize` so the renderer can take JSON.
//!
//! ## Non-goals
//!
//! * This module does not draw anything or assign colors.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

// External dependencies
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::evaluation::range::{ValueRange, finite_range};
use crate::primitives::errors::AttentionError;
use crate::primitives::matrix::Matrix;

/// A labeled set of attention-like matrices over one token sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapFrame<T> {
    matrices: Vec<Matrix<T>>,
    labels: Vec<String>,
    tokens: Vec<String>,
    ranges: Vec<Option<ValueRange<T>>>,
}

impl<T: Float> HeatmapFrame<T> {
    /// Build a frame, checking that every matrix shares one shape, that there
    /// is one label per matrix and one token per row.
    pub fn new(
        matrices: Vec<Matrix<T>>,
        labels: Vec<String>,
        tokens: Vec<String>,
    ) -> Result<Self, AttentionError> {
        let first = matrices.first().ok_or(AttentionError::EmptyInput)?;
        let expected = first.shape();

        for (index, m) in matrices.iter().enumerate() {
            if m.shape() != expected {
                return Err(AttentionError::FrameShapeMismatch {
                    index,
                    expected,
                    got: m.shape(),
                });
            }
        }

        if labels.len() != matrices.len() {
            return Err(AttentionError::MismatchedLabels {
                matrices: matrices.len(),
                labels: labels.len(),
            });
        }

        if tokens.len() != expected.0 {
            return Err(AttentionError::MismatchedTokens {
                tokens: tokens.len(),
                rows: expected.0,
            });
        }

        let ranges = matrices.iter().map(finite_range).collect();

        Ok(Self {
            matrices,
            labels,
            tokens,
            ranges,
        })
    }

    /// Matrices in display order.
    pub fn matrices(&self) -> &[Matrix<T>] {
        &self.matrices
    }

    /// One label per matrix.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// One token per sequence position.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Finite range of each matrix; `None` for a matrix without finite entries.
    pub fn ranges(&self) -> &[Option<ValueRange<T>>] {
        &self.ranges
    }

    /// Number of matrices.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Always `false`: a frame holds at least one matrix.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
