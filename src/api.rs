//! High-level API for effective attention decomposition.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring the decomposition and a `Decomposer` that
//! runs every operation under that configuration.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Operations are generic over `Float` types.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`EffectiveAttentionBuilder`] via `EffectiveAttention::new()`.
//! 2. Chain configuration methods (`.precision()`, `.rcond()`, etc.).
//! 3. Call `.build()` to get a [`Decomposer`].

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{DEFAULT_MAX_ITERATIONS, Executor};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::effective::AttentionMask;
pub use crate::engine::executor::ExecutorConfig;
pub use crate::engine::heads::{HeadInput, HeadMode, HeadOutcome, HeadReport};
pub use crate::evaluation::frame::HeatmapFrame;
pub use crate::evaluation::range::{ValueRange, finite_range};
pub use crate::math::nullspace::NullSpace;
pub use crate::primitives::errors::{AttentionError, FailureCause};
pub use crate::primitives::matrix::Matrix;
pub use crate::primitives::precision::Precision;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the decomposition.
#[derive(Debug, Clone, Default)]
pub struct EffectiveAttentionBuilder {
    /// Working precision for decompositions (default: Single).
    pub precision: Option<Precision>,

    /// Relative rank tolerance override (default: ε * max(m, n)).
    pub rcond: Option<f64>,

    /// SVD iteration cap (default: 10 000).
    pub max_iterations: Option<usize>,

    /// Mask applied to the null component (default: Causal).
    pub mask: Option<AttentionMask>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl EffectiveAttentionBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working precision.
    pub fn precision(mut self, precision: Precision) -> Self {
        if self.precision.is_some() {
            self.duplicate_param = Some("precision");
        }
        self.precision = Some(precision);
        self
    }

    /// Override the relative tolerance used for rank determination.
    ///
    /// Singular values at or below `rcond * s_max` count as zero.
    pub fn rcond(mut self, rcond: f64) -> Self {
        if self.rcond.is_some() {
            self.duplicate_param = Some("rcond");
        }
        self.rcond = Some(rcond);
        self
    }

    /// Set the maximum number of SVD iterations before reporting non-convergence.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the mask applied to the null component.
    pub fn mask(mut self, mask: AttentionMask) -> Self {
        if self.mask.is_some() {
            self.duplicate_param = Some("mask");
        }
        self.mask = Some(mask);
        self
    }

    /// Shorthand for `.mask(Causal)` (`true`) or `.mask(Full)` (`false`).
    pub fn causal(self, causal: bool) -> Self {
        self.mask(if causal {
            AttentionMask::Causal
        } else {
            AttentionMask::Full
        })
    }

    /// Validate the configuration and build a decomposer.
    pub fn build(self) -> Result<Decomposer, AttentionError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Validate tolerance override
        if let Some(rcond) = self.rcond {
            Validator::validate_rcond(rcond)?;
        }

        // Validate iteration cap
        let max_iterations = self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        Validator::validate_iterations(max_iterations)?;

        Ok(Decomposer {
            executor: Executor::new(ExecutorConfig {
                precision: self.precision.unwrap_or_default(),
                rcond: self.rcond,
                max_iterations,
                mask: self.mask.unwrap_or_default(),
            }),
        })
    }
}

// ============================================================================
// Decomposer
// ============================================================================

/// Runs null-space and attention decompositions under one configuration.
///
/// Stateless apart from its configuration; safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decomposer {
    executor: Executor,
}

impl Decomposer {
    /// The resolved configuration.
    pub fn config(&self) -> &ExecutorConfig {
        self.executor.config()
    }

    /// Orthonormal basis of the null space of `a`.
    pub fn nullspace<T: Float>(&self, a: &Matrix<T>) -> Result<NullSpace<T>, AttentionError> {
        self.executor.nullspace(a)
    }

    /// Orthogonal projector onto the column space of `a` (`n x k`), `n x n`.
    pub fn projection<T: Float>(&self, a: &Matrix<T>) -> Result<Matrix<T>, AttentionError> {
        self.executor.projection(a)
    }

    /// Projector onto the null space of `matrixᵗ`, or `None` if it is trivial.
    pub fn nullspace_projection<T: Float>(
        &self,
        matrix: &Matrix<T>,
    ) -> Result<Option<Matrix<T>>, AttentionError> {
        self.executor.nullspace_projection(matrix)
    }

    /// Effective attention: `max(attn - mask(attn · Pᵗ), 0)`.
    ///
    /// Returns all zeros when the null space of `valueᵗ` is trivial.
    pub fn effective_attention<T: Float>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        self.executor.effective_attention(attn, value)
    }

    /// The masked null component `mask(attn · Pᵗ)` removed by
    /// [`effective_attention`](Self::effective_attention).
    pub fn null_attention<T: Float>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        self.executor.null_attention(attn, value)
    }

    /// Attention scaled by value-vector norms, rows renormalized to one.
    pub fn weight_by_value_norm<T: Float>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        self.executor.weight_by_value_norm(attn, value)
    }

    /// Run `mode` over many (layer, head) units; failures stay per unit.
    pub fn run_heads<T: Float>(&self, units: &[HeadInput<T>], mode: HeadMode) -> HeadReport<T> {
        self.executor.run_heads(units, mode)
    }
}

// ============================================================================
// Default-configuration shortcuts
// ============================================================================

/// [`Decomposer::nullspace`] with the default configuration.
pub fn nullspace<T: Float>(a: &Matrix<T>) -> Result<NullSpace<T>, AttentionError> {
    Decomposer::default().nullspace(a)
}

/// [`Decomposer::projection`] with the default configuration.
pub fn projection<T: Float>(a: &Matrix<T>) -> Result<Matrix<T>, AttentionError> {
    Decomposer::default().projection(a)
}

/// [`Decomposer::effective_attention`] with the default configuration.
pub fn effective_attention<T: Float>(
    attn: &Matrix<T>,
    value: &Matrix<T>,
) -> Result<Matrix<T>, AttentionError> {
    Decomposer::default().effective_attention(attn, value)
}

/// [`Decomposer::weight_by_value_norm`] with the default configuration.
pub fn weight_by_value_norm<T: Float>(
    attn: &Matrix<T>,
    value: &Matrix<T>,
) -> Result<Matrix<T>, AttentionError> {
    Decomposer::default().weight_by_value_norm(attn, value)
}
