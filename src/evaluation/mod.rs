//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer prepares computed matrices for consumers outside the crate:
//! - Finite value ranges for color-scale normalization
//! - The validated, serializable heatmap payload
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Renderer payload.
pub mod frame;

/// Finite value ranges.
pub mod range;
