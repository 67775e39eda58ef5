//! Error types for effective-attention decomposition.
//!
//! ## Purpose
//!
//! This module defines the single error enum returned by every fallible
//! operation in the crate. Errors are local to one (layer, head) computation;
//! callers that process many heads catch and report them per unit.
//!
//! ## Design notes
//!
//! * **Distinct failure modes**: A decomposition that fails to converge is an
//!   error, while an empty null space is a valid result (see `NullSpace`).
//! * **Plain data**: Variants carry shapes and indices, never matrices, so
//!   errors stay cheap to clone and compare.
//!
//! ## Non-goals
//!
//! * This module does not attempt recovery; recovery policy belongs to callers.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt;
use thiserror::Error;

// ============================================================================
// Decomposition Failure Cause
// ============================================================================

/// Why a singular value decomposition could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The input contained NaN or infinite entries.
    NonFiniteInput,

    /// The iterative solver did not converge within the iteration cap.
    NotConverged,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::NonFiniteInput => write!(f, "input contains non-finite values"),
            FailureCause::NotConverged => write!(f, "SVD did not converge"),
        }
    }
}

// ============================================================================
// Attention Error
// ============================================================================

/// Errors raised by null-space and attention decomposition operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttentionError {
    /// A matrix with zero rows or zero columns was given where data is required.
    #[error("Input matrix is empty")]
    EmptyInput,

    /// A flat buffer does not match the declared matrix shape.
    #[error("Invalid shape: {rows}x{cols} requires {expected} values, got {got}")]
    InvalidShape {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Number of values the shape requires.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// The attention matrix is not square.
    #[error("Attention matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count of the attention matrix.
        rows: usize,
        /// Column count of the attention matrix.
        cols: usize,
    },

    /// Attention and value matrices disagree on the token length.
    #[error("Shape mismatch: attention has {attn_tokens} tokens, value has {value_tokens}")]
    ShapeMismatch {
        /// Token length implied by the attention matrix.
        attn_tokens: usize,
        /// Row count of the value matrix.
        value_tokens: usize,
    },

    /// The singular value decomposition could not be computed.
    #[error("Decomposition failed on {rows}x{cols} matrix: {cause}")]
    DecompositionFailure {
        /// Row count of the decomposed matrix.
        rows: usize,
        /// Column count of the decomposed matrix.
        cols: usize,
        /// Underlying reason.
        cause: FailureCause,
    },

    /// A row of value-norm-scaled attention sums to zero and cannot be renormalized.
    #[error("Degenerate row {row}: scaled attention sums to zero")]
    DegenerateRow {
        /// Index of the offending row.
        row: usize,
    },

    /// A value could not be represented or is not finite.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Relative tolerance override is not a positive finite number.
    #[error("Invalid tolerance: {0} (must be > 0 and finite)")]
    InvalidTolerance(f64),

    /// SVD iteration cap is outside the accepted range.
    #[error("Invalid max_iterations: {0} (must be in [1, 1000000])")]
    InvalidIterations(usize),

    /// A builder parameter was configured more than once.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Name of the repeated parameter.
        parameter: &'static str,
    },

    /// Renderer payload has a label count different from its matrix count.
    #[error("Label count mismatch: {matrices} matrices, {labels} labels")]
    MismatchedLabels {
        /// Number of matrices.
        matrices: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Renderer payload token count differs from the matrix row count.
    #[error("Token count mismatch: {tokens} tokens for {rows} matrix rows")]
    MismatchedTokens {
        /// Number of tokens.
        tokens: usize,
        /// Number of matrix rows.
        rows: usize,
    },

    /// A matrix in a renderer payload has a different shape from the first one.
    #[error("Frame matrix {index} has shape {got:?}, expected {expected:?}")]
    FrameShapeMismatch {
        /// Position of the offending matrix.
        index: usize,
        /// Shape of the first matrix.
        expected: (usize, usize),
        /// Shape of the offending matrix.
        got: (usize, usize),
    },
}

impl AttentionError {
    /// Whether this error comes from the numerical decomposition itself.
    pub fn is_decomposition_failure(&self) -> bool {
        matches!(self, AttentionError::DecompositionFailure { .. })
    }
}
