//! Per-layer, per-head fan-out with isolated failures.
//!
//! ## Purpose
//!
//! A model yields one attention/value pair per (layer, head). This module
//! runs the selected analysis over a batch of such units and reports one
//! outcome per unit, in input order.
//!
//! ## Design notes
//!
//! * **Isolation**: A failing unit is logged and recorded; the remaining
//!   units still run.
//! * **Sequential**: Units are processed in order. Each unit is independent,
//!   so callers may split a batch across threads with one executor each.
//!
//! ## Non-goals
//!
//! * This module does not extract attention from a model.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

// External dependencies
use num_traits::Float;
use tracing::{debug, debug_span, warn};

// Internal dependencies
use crate::engine::executor::Executor;
use crate::engine::validator::Validator;
use crate::evaluation::frame::HeatmapFrame;
use crate::primitives::errors::AttentionError;
use crate::primitives::matrix::Matrix;

// ============================================================================
// Head Mode
// ============================================================================

/// Analysis applied to every unit of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadMode {
    /// Effective attention (null-space component removed).
    #[default]
    Effective,

    /// Attention weighted by value-vector norms.
    ValueNorm,

    /// The validated raw attention matrix.
    Raw,
}

// ============================================================================
// Inputs and Outcomes
// ============================================================================

/// One (layer, head) attention/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadInput<T> {
    /// Layer index.
    pub layer: usize,
    /// Head index within the layer.
    pub head: usize,
    /// `tok_len x tok_len` attention weights.
    pub attn: Matrix<T>,
    /// `tok_len x dim` value vectors.
    pub value: Matrix<T>,
}

/// Result of processing one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadOutcome<T> {
    /// Layer index.
    pub layer: usize,
    /// Head index within the layer.
    pub head: usize,
    /// The analysed matrix, or the error local to this unit.
    pub result: Result<Matrix<T>, AttentionError>,
}

impl<T> HeadOutcome<T> {
    /// Display label, `L{layer}H{head}`.
    pub fn label(&self) -> String {
        format!("L{}H{}", self.layer, self.head)
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadReport<T> {
    /// One outcome per input unit.
    pub outcomes: Vec<HeadOutcome<T>>,
}

impl<T: Float> HeadReport<T> {
    /// Number of units that produced a matrix.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of units that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed units with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (usize, usize, &AttentionError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.layer, o.head, e)))
    }

    /// Build a renderer payload from the successful units, labeled `L{layer}H{head}`.
    pub fn to_frame(&self, tokens: Vec<String>) -> Result<HeatmapFrame<T>, AttentionError> {
        let mut matrices = Vec::new();
        let mut labels = Vec::new();
        for outcome in &self.outcomes {
            if let Ok(m) = &outcome.result {
                matrices.push(m.clone());
                labels.push(outcome.label());
            }
        }
        HeatmapFrame::new(matrices, labels, tokens)
    }
}

// ============================================================================
// Runner
// ============================================================================

impl Executor {
    /// Run `mode` over every unit, isolating failures per unit.
    pub fn run_heads<T: Float>(&self, units: &[HeadInput<T>], mode: HeadMode) -> HeadReport<T> {
        let mut outcomes = Vec::with_capacity(units.len());

        for unit in units {
            let span = debug_span!("head", layer = unit.layer, head = unit.head);
            let _enter = span.enter();

            let result = match mode {
                HeadMode::Effective => self.effective_attention(&unit.attn, &unit.value),
                HeadMode::ValueNorm => self.weight_by_value_norm(&unit.attn, &unit.value),
                HeadMode::Raw => {
                    Validator::validate_pair(&unit.attn, &unit.value).map(|_| unit.attn.clone())
                }
            };

            if let Err(err) = &result {
                warn!(layer = unit.layer, head = unit.head, error = %err, "head analysis failed");
            }

            outcomes.push(HeadOutcome {
                layer: unit.layer,
                head: unit.head,
                result,
            });
        }

        let report = HeadReport { outcomes };
        debug!(
            mode = ?mode,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "head batch finished"
        );
        report
    }
}
