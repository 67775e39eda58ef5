//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates decompositions:
//! - Input and parameter validation
//! - Precision promotion and single-unit execution
//! - Per-layer, per-head batches with isolated failures
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-unit execution.
pub mod executor;

/// Multi-head batches.
pub mod heads;

/// Input validation.
pub mod validator;
