//! Effective attention decomposition.
//!
//! ## Purpose
//!
//! This module splits an attention matrix into the part that acts on the
//! value vectors it weights and the part lying in the null space of the
//! value map, which the value projection discards.
//!
//! ## Design notes
//!
//! * **Null component**: `null = attn · Pᵗ`, with `P` the projector onto the
//!   null space of `valueᵗ`.
//! * **Masking before subtraction**: The mask is applied to the null component
//!   only, never to the original attention.
//! * **Clamping after subtraction**: `effective = max(attn - null, 0)`.
//! * **Trivial null space**: The result is the all-zero matrix.
//!
//! ## Key concepts
//!
//! * **Causal mask**: Entries strictly above the diagonal (future positions)
//!   of the null component are zeroed.
//!
//! ## Invariants
//!
//! * Every output entry is `>= 0`.
//! * Output shape equals the attention shape.
//! * Row sums are NOT preserved; the softmax normalization is intentionally lost.
//!
//! ## Non-goals
//!
//! * This module does not validate shapes (see `engine::validator`).
//! * This module does not renormalize its output.

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::math::projection::nullspace_projection_in;
use crate::primitives::errors::AttentionError;
use crate::primitives::matrix::Matrix;

// ============================================================================
// Attention Mask
// ============================================================================

/// Mask applied to the null component before it is subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttentionMask {
    /// Autoregressive attention: keep the lower triangle including the diagonal.
    #[default]
    Causal,

    /// Bidirectional attention: keep every entry.
    Full,
}

impl AttentionMask {
    /// Apply the mask to a square matrix.
    pub fn apply<T: Float>(self, m: &Matrix<T>) -> Matrix<T> {
        match self {
            AttentionMask::Causal => m.lower_triangular(),
            AttentionMask::Full => m.clone(),
        }
    }
}

// ============================================================================
// Decomposition
// ============================================================================

/// Settings shared by the decomposition passes, in working precision `W`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecompositionSettings<W> {
    /// Relative rank tolerance override.
    pub rcond: Option<W>,

    /// SVD iteration cap.
    pub max_iterations: usize,

    /// Mask applied to the null component.
    pub mask: AttentionMask,
}

/// The masked null component `mask(attn · Pᵗ)`, or `None` when the null
/// space of `valueᵗ` is trivial.
fn masked_null_component<W: FloatLinalg>(
    attn: &Matrix<W>,
    value: &Matrix<W>,
    settings: &DecompositionSettings<W>,
) -> Result<Option<Matrix<W>>, AttentionError> {
    let projector =
        match nullspace_projection_in(value, settings.rcond, settings.max_iterations)? {
            Some(p) => p,
            None => return Ok(None),
        };

    let n = attn.rows();
    let null = Matrix::from_vec(
        n,
        n,
        W::mul_transpose(attn.as_slice(), n, projector.as_slice(), n, n),
    )?;

    Ok(Some(settings.mask.apply(&null)))
}

/// Null component of attention: the mass acting inside the null space of
/// the value map, after masking. Zero when that null space is trivial.
pub fn null_attention_in<W: FloatLinalg>(
    attn: &Matrix<W>,
    value: &Matrix<W>,
    settings: &DecompositionSettings<W>,
) -> Result<Matrix<W>, AttentionError> {
    Ok(masked_null_component(attn, value, settings)?
        .unwrap_or_else(|| Matrix::zeros(attn.rows(), attn.cols())))
}

/// Effective attention `max(attn - mask(attn · Pᵗ), 0)`.
pub fn effective_attention_in<W: FloatLinalg>(
    attn: &Matrix<W>,
    value: &Matrix<W>,
    settings: &DecompositionSettings<W>,
) -> Result<Matrix<W>, AttentionError> {
    match masked_null_component(attn, value, settings)? {
        None => {
            debug!(
                tokens = attn.rows(),
                "value map has trivial null space, effective attention is zero"
            );
            Ok(Matrix::zeros(attn.rows(), attn.cols()))
        }
        Some(null) => Ok(attn.zip_map(&null, |a, b| (a - b).max(W::zero()))),
    }
}
