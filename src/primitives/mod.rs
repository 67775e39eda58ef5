//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures shared by every
//! other layer:
//! - The row-major `Matrix` value type
//! - The working `Precision` used for decompositions
//! - The crate-wide error type
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Dense row-major matrix.
pub mod matrix;

/// Working floating-point precision.
pub mod precision;
