//! Execution engine for attention decomposition.
//!
//! ## Purpose
//!
//! This module provides the executor that runs every decomposition for a
//! single attention/value pair. It validates inputs, promotes them to the
//! configured working precision, calls the algorithm layer, and demotes the
//! result back to the caller's float type.
//!
//! ## Design notes
//!
//! * **Explicit promotion**: `Precision` picks `f32` or `f64` for all SVD work;
//!   callers may hold either type.
//! * **Stateless**: The executor only holds configuration and is safe to share
//!   between threads processing disjoint heads.
//! * Generic over `Float` types to support f32 and f64 inputs.
//!
//! ## Invariants
//!
//! * Shape errors are raised before any decomposition runs.
//! * Inputs are never mutated.
//!
//! ## Non-goals
//!
//! * This module does not fan out over layers or heads (see `engine::heads`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::effective::{
    AttentionMask, DecompositionSettings, effective_attention_in, null_attention_in,
};
use crate::algorithms::value_norm::weight_by_value_norm_in;
use crate::engine::validator::Validator;
use crate::math::linalg::FloatLinalg;
use crate::math::nullspace::{NullSpace, nullspace_in};
use crate::math::projection::{nullspace_projection_in, projection_in};
use crate::primitives::errors::AttentionError;
use crate::primitives::matrix::Matrix;
use crate::primitives::precision::Precision;

// ============================================================================
// Configuration
// ============================================================================

/// Default SVD iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Resolved decomposition configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutorConfig {
    /// Working precision for decompositions.
    pub precision: Precision,

    /// Relative rank tolerance override; `None` uses `ε * max(m, n)`.
    pub rcond: Option<f64>,

    /// SVD iteration cap.
    pub max_iterations: usize,

    /// Mask applied to the null component.
    pub mask: AttentionMask,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            rcond: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            mask: AttentionMask::default(),
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs decompositions under one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// Create an executor from an already validated configuration.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Settings for the algorithm layer in working precision `W`.
    fn settings<W: FloatLinalg>(&self) -> Result<DecompositionSettings<W>, AttentionError> {
        let rcond = match self.config.rcond {
            Some(r) => Some(W::from(r).ok_or(AttentionError::InvalidTolerance(r))?),
            None => None,
        };
        Ok(DecompositionSettings {
            rcond,
            max_iterations: self.config.max_iterations,
            mask: self.config.mask,
        })
    }

    // ========================================================================
    // Null Space and Projection
    // ========================================================================

    /// Null space of `a`.
    pub fn nullspace<T: Float>(&self, a: &Matrix<T>) -> Result<NullSpace<T>, AttentionError> {
        match self.config.precision {
            Precision::Double => self.nullspace_as::<T, f64>(a),
            Precision::Single => self.nullspace_as::<T, f32>(a),
        }
    }

    fn nullspace_as<T: Float, W: FloatLinalg>(
        &self,
        a: &Matrix<T>,
    ) -> Result<NullSpace<T>, AttentionError> {
        let settings = self.settings::<W>()?;
        nullspace_in(&a.cast::<W>()?, settings.rcond, settings.max_iterations)?.cast::<T>()
    }

    /// Orthogonal projector onto the column space of `a`.
    pub fn projection<T: Float>(&self, a: &Matrix<T>) -> Result<Matrix<T>, AttentionError> {
        match self.config.precision {
            Precision::Double => self.projection_as::<T, f64>(a),
            Precision::Single => self.projection_as::<T, f32>(a),
        }
    }

    fn projection_as<T: Float, W: FloatLinalg>(
        &self,
        a: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        projection_in(&a.cast::<W>()?, self.config.max_iterations)?.cast::<T>()
    }

    /// Projector onto the null space of `matrixᵗ`; `None` when it is trivial.
    pub fn nullspace_projection<T: Float>(
        &self,
        matrix: &Matrix<T>,
    ) -> Result<Option<Matrix<T>>, AttentionError> {
        match self.config.precision {
            Precision::Double => self.nullspace_projection_as::<T, f64>(matrix),
            Precision::Single => self.nullspace_projection_as::<T, f32>(matrix),
        }
    }

    fn nullspace_projection_as<T: Float, W: FloatLinalg>(
        &self,
        matrix: &Matrix<T>,
    ) -> Result<Option<Matrix<T>>, AttentionError> {
        let settings = self.settings::<W>()?;
        match nullspace_projection_in(
            &matrix.cast::<W>()?,
            settings.rcond,
            settings.max_iterations,
        )? {
            Some(p) => p.cast::<T>().map(Some),
            None => Ok(None),
        }
    }

    // ========================================================================
    // Attention Analyses
    // ========================================================================

    /// Effective attention of one (layer, head) unit.
    pub fn effective_attention<T: Float>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        Validator::validate_pair(attn, value)?;
        match self.config.precision {
            Precision::Double => self.effective_as::<T, f64>(attn, value),
            Precision::Single => self.effective_as::<T, f32>(attn, value),
        }
    }

    fn effective_as<T: Float, W: FloatLinalg>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        let settings = self.settings::<W>()?;
        effective_attention_in(&attn.cast::<W>()?, &value.cast::<W>()?, &settings)?.cast::<T>()
    }

    /// Masked null component of one (layer, head) unit.
    pub fn null_attention<T: Float>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        Validator::validate_pair(attn, value)?;
        match self.config.precision {
            Precision::Double => self.null_as::<T, f64>(attn, value),
            Precision::Single => self.null_as::<T, f32>(attn, value),
        }
    }

    fn null_as<T: Float, W: FloatLinalg>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        let settings = self.settings::<W>()?;
        null_attention_in(&attn.cast::<W>()?, &value.cast::<W>()?, &settings)?.cast::<T>()
    }

    /// Value-norm weighted attention of one (layer, head) unit.
    ///
    /// Runs in the caller's precision; no decomposition is involved.
    pub fn weight_by_value_norm<T: Float>(
        &self,
        attn: &Matrix<T>,
        value: &Matrix<T>,
    ) -> Result<Matrix<T>, AttentionError> {
        Validator::validate_pair(attn, value)?;
        Validator::validate_finite(value, "value")?;
        weight_by_value_norm_in(attn, value)
    }
}
