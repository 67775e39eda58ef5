//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer composes the math layer into the attention analyses:
//! - Effective attention (null-space removal with masking and clamping)
//! - Value-norm weighted attention
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Effective attention decomposition.
pub mod effective;

/// Value-norm weighting.
pub mod value_norm;
