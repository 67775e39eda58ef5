//! Dense row-major matrix value type.
//!
//! ## Purpose
//!
//! This module provides `Matrix<T>`, the immutable-by-convention value type
//! exchanged at every boundary of the crate: attention matrices, value
//! matrices, null-space bases and projection operators.
//!
//! ## Design notes
//!
//! * **Row-major**: Row `i` is the contiguous slice `data[i * cols..(i + 1) * cols]`,
//!   matching how attention rows (queries) are read.
//! * **Value semantics**: Operations return new matrices; no operation mutates
//!   a matrix it borrows.
//! * **Zero-width allowed**: An `n x 0` matrix is a valid value and represents
//!   an empty basis.
//!
//! ## Non-goals
//!
//! * This module does not implement decompositions (see `math::linalg`).
//! * This module does not provide a general linear algebra API.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::Index;
use num_traits::{Float, NumCast};
use serde::Serialize;

// Internal dependencies
use crate::primitives::errors::AttentionError;

// ============================================================================
// Matrix
// ============================================================================

/// A dense, row-major 2-D matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Matrix<T> {
    /// Create a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Create a matrix from a row-major slice.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, AttentionError> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Create a matrix from an owned row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, AttentionError> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(AttentionError::InvalidShape {
                rows,
                cols,
                expected,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from a sequence of equally long rows.
    ///
    /// An empty sequence produces a `0 x 0` matrix.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, AttentionError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(AttentionError::InvalidShape {
                    rows: n_rows,
                    cols: n_cols,
                    expected: n_rows * n_cols,
                    got: data.len() + row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Apply `f` element-wise.
    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equally shaped matrices element-wise.
    ///
    /// Callers guarantee equal shapes; the result takes `self`'s shape.
    pub(crate) fn zip_map<F: Fn(T, T) -> T>(&self, other: &Self, f: F) -> Self {
        debug_assert_eq!(self.shape(), other.shape());
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Keep the lower-triangular part (including the diagonal), zeroing
    /// every entry strictly above the main diagonal.
    pub fn lower_triangular(&self) -> Self {
        let mut out = self.clone();
        for i in 0..out.rows {
            for j in (i + 1)..out.cols {
                out.data[i * out.cols + j] = T::zero();
            }
        }
        out
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Whether every entry is within `tol` of the corresponding entry of `other`.
    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= tol)
    }

    /// Convert every entry to another float type.
    ///
    /// Fails if any entry cannot be represented in the target type.
    pub fn cast<U: Float>(&self) -> Result<Matrix<U>, AttentionError> {
        let mut data = Vec::with_capacity(self.data.len());
        for (idx, &v) in self.data.iter().enumerate() {
            let converted = <U as NumCast>::from(v).ok_or_else(|| {
                AttentionError::InvalidNumericValue(format!(
                    "entry ({}, {})={} is not representable in the working precision",
                    idx / self.cols.max(1),
                    idx % self.cols.max(1),
                    v.to_f64().unwrap_or(f64::NAN)
                ))
            })?;
            data.push(converted);
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the matrix has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry at `(i, j)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows && j < self.cols {
            self.data.get(i * self.cols + j)
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Row-major entries.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix and return its row-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}
