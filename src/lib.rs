//! # Effective Attention: Null-Space Decomposition of Transformer Attention
//!
//! Splits an attention matrix into the part that changes the attention
//! output and the part the value projection throws away.
//!
//! ## What is effective attention?
//!
//! A head's output is `attn · value`. Any component of an attention row that
//! lies in the null space of `valueᵗ` is mapped to zero by that product:
//! the head "spends" attention mass on it without affecting its output.
//! Removing that component leaves the **effective attention**, the weight
//! mass that actually reaches the downstream representation.
//!
//! **How it is computed:**
//!
//! 1. Find an orthonormal basis of the null space of `valueᵗ` with an SVD
//!    and a machine-precision rank tolerance.
//! 2. Build the orthogonal projector `P` onto that null space.
//! 3. Take the null component `attn · Pᵗ` and apply the causal mask to it.
//! 4. Subtract it from `attn` and clamp negative entries to zero.
//!
//! The result is non-negative, but its rows no longer sum to one. This is
//! intended: the mass that was removed is exactly what the head discarded.
//!
//! Decompositions run in single precision unless `.precision(Double)` is
//! requested, so the rounding noise of f32 model activations does not
//! inflate the numerical rank.
//!
//! ## Quick Start
//!
//! ```rust
//! use effective_attention::prelude::*;
//!
//! let attn = Matrix::from_rows(&[[0.6, 0.4], [0.5, 0.5]])?;
//! let value = Matrix::from_rows(&[[1.0, 0.0], [1.0, 0.0]])?;
//!
//! let effective = effective_attention(&attn, &value)?;
//!
//! assert!((effective[(0, 0)] - 0.5f64).abs() < 1e-6);
//! assert!((effective[(0, 1)] - 0.4f64).abs() < 1e-6);
//! # Result::<(), AttentionError>::Ok(())
//! ```
//!
//! ### Configured Decomposer
//!
//! ```rust
//! use effective_attention::prelude::*;
//!
//! let decomposer = EffectiveAttention::new()
//!     .precision(Double)      // Exact f64 input: rank tolerance uses f64 epsilon
//!     .causal(false)          // Bidirectional encoder: keep the full null component
//!     .max_iterations(5_000)  // SVD iteration cap
//!     .build()?;
//!
//! let value = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [0.0, 1.0]])?;
//! let null = decomposer.nullspace(&value.transpose())?;
//! assert_eq!(null.nullity(), 1);
//! # Result::<(), AttentionError>::Ok(())
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<_, AttentionError>`:
//!
//! * `DecompositionFailure`: the SVD did not converge or the value matrix
//!   contains NaN/∞. This is never replaced by a zero matrix.
//! * `DegenerateRow`: value-norm weighting met a row whose scaled sum is zero.
//! * `NotSquare` / `ShapeMismatch`: rejected before any numerical work.
//!
//! A trivial null space is not an error: `nullspace` reports it as
//! `NullSpace::Trivial`, and `effective_attention` returns all zeros.
//!
//! ## Multi-head Batches
//!
//! [`Decomposer::run_heads`](prelude::Decomposer::run_heads) processes many
//! (layer, head) units and records one outcome per unit, so a failure in one
//! head never blocks the others.
//!
//! ## Logging
//!
//! Decompositions emit `tracing` events (rank, nullity, thresholds at
//! `debug`, per-head failures at `warn`). The crate never installs a
//! subscriber.
//!
//! ## Minimal Usage (no_std)
//!
//! Disable default features to build against `alloc` only; `nalgebra` and
//! `num-traits` then use `libm`.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the row-major `Matrix`, the working `Precision`, and errors.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the nalgebra backend, SVD null spaces, and projection operators.
mod math;

// Layer 3: Algorithms - attention analyses.
//
// Contains effective attention (with masking and clamping) and
// value-norm weighting.
mod algorithms;

// Layer 4: Evaluation - renderer boundary.
//
// Contains finite value ranges and the heatmap payload.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains validation, precision dispatch, and per-head batches.
mod engine;

// High-level fluent API.
//
// Provides the `EffectiveAttentionBuilder` and `Decomposer`.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use effective_attention::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        AttentionError, AttentionMask,
        AttentionMask::{Causal, Full},
        Decomposer, EffectiveAttentionBuilder as EffectiveAttention, ExecutorConfig,
        FailureCause, HeadInput, HeadMode, HeadOutcome, HeadReport, HeatmapFrame, Matrix,
        NullSpace, Precision,
        Precision::{Double, Single},
        ValueRange, effective_attention, finite_range, nullspace, projection,
        weight_by_value_norm,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal attention algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal evaluation helpers.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
