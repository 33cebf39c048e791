//! Core types for the epoch-observer seam.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::ProbedModel;

/// State handed to observers at the end of each epoch.
pub struct EpochContext<'a> {
    /// Current epoch (0-indexed, strictly increasing within a run).
    pub epoch: usize,
    /// Metric values for this epoch. The key set must stay stable
    /// across the whole run.
    pub metrics: &'a BTreeMap<String, f64>,
    /// Read-only view of the model under training.
    pub model: &'a dyn ProbedModel,
}

/// A single-method observer any training loop can invoke once per epoch.
///
/// Observers accumulate state and produce side effects (rendering, logging)
/// but never alter training semantics. An `Err` signals an input-contract
/// violation (metric-key drift, out-of-order epoch), not a training failure.
pub trait EpochObserver {
    /// Called after each completed epoch.
    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()>;

    /// Observer name for diagnostics.
    fn name(&self) -> &'static str {
        "EpochObserver"
    }
}
