//! Per-epoch parameter snapshots.

use serde::Serialize;

/// Ordered log of flattened model parameter vectors, one per observed epoch.
///
/// Append-only: the monitor pushes one snapshot per accepted epoch, and the
/// log is read-only to everything else. The flattened order is whatever the
/// observed model reports; it must be stable across a run for the snapshots
/// to be comparable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterSnapshotLog {
    snapshots: Vec<Vec<f32>>,
}

impl ParameterSnapshotLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a flattened parameter vector.
    pub fn push(&mut self, flattened: Vec<f32>) {
        self.snapshots.push(flattened);
    }

    /// Number of snapshots recorded.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshots have been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot by record index (call order, not epoch index).
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        self.snapshots.get(index).map(Vec::as_slice)
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<&[f32]> {
        self.snapshots.last().map(Vec::as_slice)
    }

    /// L2 norm of each snapshot, in record order.
    ///
    /// The usual post-hoc view: how far the parameter vector travels over
    /// the course of training.
    pub fn norms(&self) -> Vec<f64> {
        self.snapshots
            .iter()
            .map(|s| s.iter().map(|&v| f64::from(v) * f64::from(v)).sum::<f64>().sqrt())
            .collect()
    }
}
