//! Monitor configuration with fail-fast validation.

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};
use crate::render::AxisScale;

const MIN_PANEL_WIDTH: usize = 16;
const MIN_PANEL_HEIGHT: usize = 4;

/// Configuration for a [`TrainingMonitor`](crate::TrainingMonitor).
///
/// # Example
///
/// ```
/// use vigilar::{AxisScale, MonitorConfig};
///
/// let config = MonitorConfig {
///     plot_interval: 5,
///     smoothing: 0.8,
///     axis_scale: AxisScale::Log,
///     ..MonitorConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Epochs between renders; a render fires whenever
    /// `epoch % plot_interval == 0`, which includes epoch 0.
    pub plot_interval: usize,
    /// Exponential smoothing factor α ∈ [0, 1) for metric curves.
    pub smoothing: f64,
    /// Y-axis scale of the metrics chart.
    pub axis_scale: AxisScale,
    /// `true` = wipe the previous frame before each render (live update),
    /// `false` = append frames scroll-style. Consumed by
    /// [`TrainingMonitor::stdout`](crate::TrainingMonitor::stdout); monitors
    /// built with [`TrainingMonitor::new`](crate::TrainingMonitor::new) use
    /// whatever target they were given.
    pub clear_between_renders: bool,
    /// Panel width in terminal cells.
    pub panel_width: usize,
    /// Panel height in terminal cells.
    pub panel_height: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            plot_interval: 1,
            smoothing: 0.9,
            axis_scale: AxisScale::Linear,
            clear_between_renders: true,
            panel_width: 64,
            panel_height: 12,
        }
    }
}

impl MonitorConfig {
    /// Check the configuration, failing on the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.plot_interval == 0 {
            return Err(MonitorError::InvalidPlotInterval);
        }
        if !(0.0..1.0).contains(&self.smoothing) || !self.smoothing.is_finite() {
            return Err(MonitorError::InvalidSmoothing { value: self.smoothing });
        }
        if self.panel_width < MIN_PANEL_WIDTH || self.panel_height < MIN_PANEL_HEIGHT {
            return Err(MonitorError::PanelTooSmall {
                width: self.panel_width,
                height: self.panel_height,
            });
        }
        Ok(())
    }

    /// Names of every invalid field, empty when the configuration is valid.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if self.plot_interval == 0 {
            invalid.push("plot_interval");
        }
        if !(0.0..1.0).contains(&self.smoothing) || !self.smoothing.is_finite() {
            invalid.push("smoothing");
        }
        if self.panel_width < MIN_PANEL_WIDTH {
            invalid.push("panel_width");
        }
        if self.panel_height < MIN_PANEL_HEIGHT {
            invalid.push("panel_height");
        }
        invalid
    }
}
