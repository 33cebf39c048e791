//! vigilar - Live training monitor for ML training loops
//!
//! A training loop calls the monitor once per completed epoch; the monitor
//! accumulates raw and exponentially smoothed metric history, snapshots the
//! model's flattened parameters, and every `plot_interval` epochs renders a
//! two-panel terminal frame: metric curves plus a model-output view
//! (regression overlay or classification decision landscape) over a fixed
//! probe grid.
//!
//! The monitor is strictly passive: it reads model state through the
//! [`ProbedModel`] seam and never alters training semantics. Rendering is a
//! non-critical side channel; a failed render is logged and counted, never
//! propagated into the training loop.
//!
//! # Quick start
//!
//! ```
//! use std::collections::BTreeMap;
//! use vigilar::{BufferTarget, MonitorConfig, ProbedModel, TrainingMonitor};
//!
//! struct Linear {
//!     weight: f64,
//! }
//!
//! impl ProbedModel for Linear {
//!     fn input_dim(&self) -> usize { 1 }
//!     fn output_dim(&self) -> usize { 1 }
//!     fn predict(&self, inputs: &[f64]) -> Vec<f64> {
//!         inputs.iter().map(|x| self.weight * x).collect()
//!     }
//!     fn parameters(&self) -> Vec<f32> { vec![self.weight as f32] }
//! }
//!
//! let mut monitor =
//!     TrainingMonitor::new(MonitorConfig::default(), BufferTarget::new())?;
//! let model = Linear { weight: 0.5 };
//!
//! for epoch in 0..3 {
//!     let metrics = BTreeMap::from([("loss".to_string(), 1.0 / (epoch + 1) as f64)]);
//!     monitor.observe(epoch, &metrics, &model)?;
//! }
//!
//! assert_eq!(monitor.history().len(), 3);
//! assert_eq!(monitor.snapshots().len(), 3);
//! # Ok::<(), vigilar::MonitorError>(())
//! ```

pub mod callback;
pub mod error;
pub mod history;
pub mod metrics;
pub mod model;
pub mod monitor;
pub mod probe;
pub mod render;
pub mod snapshot;

pub use callback::{EpochContext, EpochObserver, ObserverSet};
pub use error::{MonitorError, Result};
pub use history::{MetricHistory, SeriesSummary};
pub use metrics::{Accuracy, F1Score, Mae, Metric, Mse, Precision, Recall};
pub use model::ProbedModel;
pub use monitor::{MonitorConfig, TrainingMonitor};
pub use probe::ProbeGrid;
pub use render::{
    sparkline, AxisScale, BufferTarget, Canvas, ClassificationView, MetricsChart,
    RegressionView, RenderTarget, StdoutTarget, SurfacePanel, YAxis, SPARK_CHARS,
};
pub use snapshot::ParameterSnapshotLog;
