//! The training monitor: accumulates history, snapshots parameters, and
//! periodically renders progress.

mod config;

pub use config::MonitorConfig;

use std::collections::BTreeMap;

use crate::callback::{EpochContext, EpochObserver};
use crate::error::{MonitorError, Result};
use crate::history::MetricHistory;
use crate::model::ProbedModel;
use crate::render::{MetricsChart, RenderTarget, StdoutTarget, SurfacePanel};
use crate::snapshot::ParameterSnapshotLog;

/// Passive observer of a training run.
///
/// Invoked once per completed epoch, it appends raw and smoothed metric
/// values, snapshots the model's flattened parameters, and — every
/// `plot_interval` epochs — presents a two-panel frame (metric curves plus,
/// when a [`SurfacePanel`] is attached, a model-output view) to its render
/// target. It never mutates model state and never blocks training: render
/// failures are logged and counted, not propagated.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use vigilar::{BufferTarget, MonitorConfig, TrainingMonitor};
/// # use vigilar::ProbedModel;
/// # struct Stub;
/// # impl ProbedModel for Stub {
/// #     fn input_dim(&self) -> usize { 1 }
/// #     fn output_dim(&self) -> usize { 1 }
/// #     fn predict(&self, inputs: &[f64]) -> Vec<f64> { inputs.to_vec() }
/// #     fn parameters(&self) -> Vec<f32> { vec![0.0] }
/// # }
///
/// let mut monitor =
///     TrainingMonitor::new(MonitorConfig::default(), BufferTarget::new()).unwrap();
/// let metrics = BTreeMap::from([("loss".to_string(), 0.5)]);
/// monitor.observe(0, &metrics, &Stub).unwrap();
/// assert_eq!(monitor.history().len(), 1);
/// assert_eq!(monitor.snapshots().len(), 1);
/// ```
pub struct TrainingMonitor<T: RenderTarget> {
    config: MonitorConfig,
    history: MetricHistory,
    snapshots: ParameterSnapshotLog,
    surface: Option<SurfacePanel>,
    target: T,
    last_epoch: Option<usize>,
    render_failures: usize,
}

impl TrainingMonitor<StdoutTarget> {
    /// Create a monitor that presents frames on stdout.
    ///
    /// The target is built from `config.clear_between_renders`: `true` wipes
    /// the previous frame before each render, `false` appends scroll-style.
    pub fn stdout(config: MonitorConfig) -> Result<Self> {
        let target = StdoutTarget::new(config.clear_between_renders);
        Self::new(config, target)
    }
}

impl<T: RenderTarget> TrainingMonitor<T> {
    /// Create a monitor; fails fast on an invalid configuration.
    pub fn new(config: MonitorConfig, target: T) -> Result<Self> {
        config.validate()?;
        let history = MetricHistory::new(config.smoothing)?;
        Ok(Self {
            config,
            history,
            snapshots: ParameterSnapshotLog::new(),
            surface: None,
            target,
            last_epoch: None,
            render_failures: 0,
        })
    }

    /// Attach the model-output panel (regression or classification view).
    pub fn with_surface(mut self, surface: SurfacePanel) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Record one completed epoch.
    ///
    /// Validates the epoch index and the metric key set *before* mutating
    /// anything: a rejected call leaves history and snapshot log untouched.
    pub fn observe(
        &mut self,
        epoch: usize,
        metrics: &BTreeMap<String, f64>,
        model: &dyn ProbedModel,
    ) -> Result<()> {
        if let Some(last) = self.last_epoch {
            if epoch <= last {
                return Err(MonitorError::EpochOutOfOrder { got: epoch, last });
            }
        }

        self.history.record(epoch, metrics)?;
        self.last_epoch = Some(epoch);
        self.snapshots.push(model.parameters());

        if epoch % self.config.plot_interval == 0 {
            let frame = self.compose_frame(model);
            if let Err(e) = self.target.present(&frame) {
                // Visualization is a side channel; training goes on.
                eprintln!("TrainingMonitor render failed at epoch {epoch}: {e}");
                self.render_failures += 1;
            }
        }
        Ok(())
    }

    fn compose_frame(&self, model: &dyn ProbedModel) -> String {
        let chart = MetricsChart::new(
            self.config.panel_width,
            self.config.panel_height,
            self.config.axis_scale,
        );
        let mut frame = chart.render(&self.history);
        if let Some(surface) = &self.surface {
            frame.push('\n');
            frame.push_str(&surface.render(
                model,
                self.config.panel_width,
                self.config.panel_height,
            ));
        }
        frame
    }

    /// Accumulated raw and smoothed metric history.
    pub fn history(&self) -> &MetricHistory {
        &self.history
    }

    /// Per-epoch flattened parameter snapshots.
    pub fn snapshots(&self) -> &ParameterSnapshotLog {
        &self.snapshots
    }

    /// The render target, e.g. to inspect buffered frames after a run.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The configuration this monitor was built with.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Number of render attempts that failed and were skipped.
    pub fn render_failures(&self) -> usize {
        self.render_failures
    }
}

impl<T: RenderTarget> EpochObserver for TrainingMonitor<T> {
    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
        self.observe(ctx.epoch, ctx.metrics, ctx.model)
    }

    fn name(&self) -> &'static str {
        "TrainingMonitor"
    }
}
