//! Working floating-point precision for decompositions.
//!
//! ## Purpose
//!
//! Rank determination compares singular values against a tolerance built
//! from machine epsilon. This module makes the float type that epsilon
//! belongs to an explicit configuration value instead of whatever type the
//! caller happened to hold.
//!
//! ## Design notes
//!
//! * **Promotion is explicit**: Inputs are cast to the working type before any
//!   decomposition and results are cast back afterwards.
//! * **Default**: `Single` (f32). Model activations are typically computed in
//!   single precision, and their rounding noise must not count toward the rank.
//!   `Double` is an opt-in for inputs that are exact in f64.

/// Floating-point type used for all internal numerical work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// IEEE-754 binary32 (`f32`), epsilon ≈ 1.19e-7.
    ///
    /// Rank decisions tolerate the rounding noise carried by value
    /// matrices produced in single precision.
    #[default]
    Single,

    /// IEEE-754 binary64 (`f64`), epsilon ≈ 2.22e-16.
    Double,
}
