//! Error types with actionable diagnostics.
//!
//! All errors include enough context to fix the problem without consulting
//! external documentation.

use thiserror::Error;

/// Result type alias for vigilar operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors that can occur while configuring or feeding a training monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// `plot_interval` was zero.
    #[error("plot_interval must be at least 1\n  → set the number of epochs between renders to a positive value")]
    InvalidPlotInterval,

    /// Smoothing factor outside the valid range.
    #[error("smoothing factor {value} is outside [0, 1)\n  → pick α in [0, 1); α = 0 disables smoothing")]
    InvalidSmoothing { value: f64 },

    /// Panel dimensions too small to draw anything meaningful.
    #[error("panel size {width}x{height} is too small\n  → use at least 16x4 cells")]
    PanelTooSmall { width: usize, height: usize },

    /// Probe grid needs at least two points per axis.
    #[error("probe resolution {got} is too small\n  → use at least 2 points per axis")]
    InvalidProbeResolution { got: usize },

    /// Probe range bounds are unusable.
    #[error("probe range [{lo}, {hi}] is empty or non-finite\n  → supply finite bounds with lo < hi")]
    InvalidProbeRange { lo: f64, hi: f64 },

    /// Display data arrays have mismatched lengths.
    #[error("display data misaligned: {inputs} inputs vs {targets} targets\n  → inputs and targets must pair up one-to-one")]
    DataLengthMismatch { inputs: usize, targets: usize },

    /// The metric key set changed mid-run.
    #[error("metric keys drifted at epoch {epoch}: missing [{missing}], unexpected [{unexpected}]\n  → keep the metric key set stable for the whole run")]
    MetricKeyDrift {
        epoch: usize,
        missing: String,
        unexpected: String,
    },

    /// Epoch indices must increase strictly within one run.
    #[error("epoch {got} is not after epoch {last}\n  → epoch indices are 0-based and strictly increasing within a run")]
    EpochOutOfOrder { got: usize, last: usize },
}
