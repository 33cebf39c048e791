//! Terminal rendering: canvases, charts, model-output panels, and the
//! render targets frames are presented to.

use std::io::Write;

use serde::{Deserialize, Serialize};

mod canvas;
mod chart;
mod sparkline;
mod surface;

pub use canvas::{Canvas, YAxis};
pub use chart::MetricsChart;
pub use sparkline::{sparkline, SPARK_CHARS};
pub use surface::{ClassificationView, RegressionView, SurfacePanel};

/// Y-axis scale for the metrics chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

/// Where rendered frames go.
///
/// The monitor owns exactly one target and presents one complete frame per
/// render; acquisition and release of the underlying surface stay inside a
/// single `present` call so nothing leaks across epochs.
pub trait RenderTarget: Send {
    /// Present one complete frame.
    fn present(&mut self, frame: &str) -> std::io::Result<()>;
}

/// Presents frames on stdout.
///
/// With `clear_between_frames` the previous frame is wiped first (live-update
/// display); without it frames append scroll-style.
#[derive(Debug, Clone)]
pub struct StdoutTarget {
    clear_between_frames: bool,
}

impl StdoutTarget {
    pub fn new(clear_between_frames: bool) -> Self {
        Self { clear_between_frames }
    }

    /// Whether this target wipes the previous frame before each present.
    pub fn clears_between_frames(&self) -> bool {
        self.clear_between_frames
    }
}

impl RenderTarget for StdoutTarget {
    fn present(&mut self, frame: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        if self.clear_between_frames {
            write!(stdout, "\x1b[H\x1b[2J")?;
        }
        write!(stdout, "{frame}")?;
        stdout.flush()
    }
}

/// Retains every presented frame in memory.
///
/// Used in tests and for post-hoc inspection of what was rendered.
#[derive(Debug, Clone, Default)]
pub struct BufferTarget {
    frames: Vec<String>,
}

impl BufferTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames presented so far, in order.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    /// Number of frames presented.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl RenderTarget for BufferTarget {
    fn present(&mut self, frame: &str) -> std::io::Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_target_retains_frames_in_order() {
        let mut target = BufferTarget::new();
        assert!(target.is_empty());

        target.present("first").unwrap();
        target.present("second").unwrap();

        assert_eq!(target.len(), 2);
        assert_eq!(target.frames(), &["first".to_string(), "second".to_string()]);
        assert_eq!(target.last(), Some("second"));
    }

    #[test]
    fn test_stdout_target_presents_without_error() {
        let mut target = StdoutTarget::new(false);
        assert!(target.present("frame\n").is_ok());
    }

    #[test]
    fn test_axis_scale_serde_roundtrip() {
        let json = serde_json::to_string(&AxisScale::Log).unwrap();
        assert_eq!(json, "\"log\"");
        let back: AxisScale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AxisScale::Log);
    }

    #[test]
    fn test_axis_scale_default_is_linear() {
        assert_eq!(AxisScale::default(), AxisScale::Linear);
    }
}
