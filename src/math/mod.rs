//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure numerical building blocks of the
//! decomposition:
//! - The nalgebra-backed `FloatLinalg` abstraction
//! - SVD-based null spaces with an explicit rank tolerance
//! - Orthogonal projection operators
//!
//! These are reusable mathematical building blocks with no attention-specific logic.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Linear algebra backend (nalgebra).
pub mod linalg;

/// Null space computation.
pub mod nullspace;

/// Orthogonal projection operators.
pub mod projection;
