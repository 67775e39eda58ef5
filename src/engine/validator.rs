//! Input validation for decomposition configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for builder parameters and for
//! the attention/value pairs handed to the decomposition. Shape problems are
//! rejected here, before any numerical work begins.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Shape checks run before the (linear) finiteness scans.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Token length**: The attention matrix is `tok_len x tok_len` and the
//!   value matrix has `tok_len` rows.
//! * **Value finiteness**: Non-finite value entries are left to the
//!   decomposition, which reports them as `DecompositionFailure`.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective shape constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not check that attention rows sum to one.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::AttentionError;
use crate::primitives::matrix::Matrix;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for decomposition configuration and input data.
///
/// Provides static methods that return `Result<(), AttentionError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate an attention/value pair.
    ///
    /// Checks non-emptiness, squareness of `attn`, matching token lengths, and
    /// finiteness of `attn`.
    pub fn validate_pair<T: Float>(
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<(), AttentionError> {
        // Check 1: Non-empty attention
        if attn.is_empty() {
            return Err(AttentionError::EmptyInput);
        }

        // Check 2: Square attention
        let (rows, cols) = attn.shape();
        if rows != cols {
            return Err(AttentionError::NotSquare { rows, cols });
        }

        // Check 3: Matching token lengths
        if value.rows() != rows {
            return Err(AttentionError::ShapeMismatch {
                attn_tokens: rows,
                value_tokens: value.rows(),
            });
        }

        // Check 4: Finite attention weights
        Self::validate_finite(attn, "attn")
    }

    /// Validate that every entry of `m` is finite.
    pub fn validate_finite<T: Float>(m: &Matrix<T>, name: &str) -> Result<(), AttentionError> {
        for (i, row) in m.row_iter().enumerate() {
            for (j, &val) in row.iter().enumerate() {
                if !val.is_finite() {
                    return Err(AttentionError::InvalidNumericValue(format!(
                        "{}[{}, {}]={}",
                        name,
                        i,
                        j,
                        val.to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a relative rank tolerance override.
    pub fn validate_rcond(rcond: f64) -> Result<(), AttentionError> {
        if !rcond.is_finite() || rcond <= 0.0 {
            return Err(AttentionError::InvalidTolerance(rcond));
        }
        Ok(())
    }

    /// Validate the SVD iteration cap.
    pub fn validate_iterations(iterations: usize) -> Result<(), AttentionError> {
        const MAX_ITERATIONS: usize = 1_000_000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(AttentionError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), AttentionError> {
        if let Some(param) = duplicate_param {
            return Err(AttentionError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
