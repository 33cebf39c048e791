//! Model-output panels: regression overlay and classification landscape.

use crate::error::{MonitorError, Result};
use crate::model::ProbedModel;
use crate::probe::ProbeGrid;

use super::canvas::{Canvas, YAxis};
use super::AxisScale;

/// Probability shading from low to high.
const SHADE_CHARS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Extract one output channel from a row-major prediction batch.
fn channel(outputs: &[f64], dim: usize, index: usize) -> Vec<f64> {
    outputs
        .chunks_exact(dim.max(1))
        .map(|row| row.get(index).copied().unwrap_or(f64::NAN))
        .collect()
}

/// Held-out display data for the regression variant: probe line, optional
/// ground-truth function, and the training pairs drawn as an overlay.
pub struct RegressionView {
    probe: ProbeGrid,
    truth: Option<Box<dyn Fn(f64) -> f64 + Send>>,
    train_inputs: Vec<f64>,
    train_targets: Vec<f64>,
}

impl std::fmt::Debug for RegressionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegressionView")
            .field("probe", &self.probe)
            .field("truth", &self.truth.as_ref().map(|_| "<fn>"))
            .field("train_inputs", &self.train_inputs)
            .field("train_targets", &self.train_targets)
            .finish()
    }
}

impl RegressionView {
    /// Build the view and its probe line over `[lo, hi]`.
    pub fn new(
        probe_range: (f64, f64),
        probe_resolution: usize,
        train_inputs: Vec<f64>,
        train_targets: Vec<f64>,
    ) -> Result<Self> {
        if train_inputs.len() != train_targets.len() {
            return Err(MonitorError::DataLengthMismatch {
                inputs: train_inputs.len(),
                targets: train_targets.len(),
            });
        }
        Ok(Self {
            probe: ProbeGrid::line(probe_range.0, probe_range.1, probe_resolution)?,
            truth: None,
            train_inputs,
            train_targets,
        })
    }

    /// Attach the ground-truth function drawn over the probe domain.
    pub fn with_truth(mut self, truth: impl Fn(f64) -> f64 + Send + 'static) -> Self {
        self.truth = Some(Box::new(truth));
        self
    }

    pub fn probe(&self) -> &ProbeGrid {
        &self.probe
    }

    fn render(&self, model: &dyn ProbedModel, width: usize, height: usize) -> String {
        if width == 0 || height == 0 {
            return String::new();
        }
        let ProbeGrid::Line { points } = &self.probe else {
            return String::from("(regression view needs a line probe)\n");
        };

        let dim = model.output_dim();
        let outputs = model.predict(&self.probe.flat_inputs());
        let means = channel(&outputs, dim, 0);
        let spreads = if dim >= 2 {
            Some(channel(&outputs, dim, 1))
        } else {
            None
        };
        let train_preds = channel(&model.predict(&self.train_inputs), dim, 0);
        let truth_values: Option<Vec<f64>> = self
            .truth
            .as_ref()
            .map(|f| points.iter().map(|&x| f(x)).collect());

        // Fit the y-axis to everything the panel will draw.
        let mut extent: Vec<f64> = Vec::new();
        extent.extend(&means);
        extent.extend(&self.train_targets);
        extent.extend(&train_preds);
        if let Some(t) = &truth_values {
            extent.extend(t);
        }
        if let Some(s) = &spreads {
            for (m, d) in means.iter().zip(s) {
                extent.push(m + d);
                extent.push(m - d);
            }
        }
        let axis = YAxis::fit(extent.iter(), AxisScale::Linear);

        let (x_lo, x_hi) = (points[0], points[points.len() - 1]);
        let x_col = |x: f64| -> usize {
            let normalized = ((x - x_lo) / (x_hi - x_lo)).clamp(0.0, 1.0);
            (normalized * (width - 1) as f64).round() as usize
        };

        let mut canvas = Canvas::new(width, height);

        // Spread band first, everything else draws over it.
        if let Some(spreads) = &spreads {
            for ((&x, &m), &d) in points.iter().zip(&means).zip(spreads) {
                let col = x_col(x);
                if let (Some(top), Some(bottom)) =
                    (axis.row(m + d.abs(), height), axis.row(m - d.abs(), height))
                {
                    for row in top..=bottom {
                        canvas.set(col, row, SHADE_CHARS[1]);
                    }
                }
            }
        }
        if let Some(truth_values) = &truth_values {
            for (&x, &y) in points.iter().zip(truth_values) {
                if let Some(row) = axis.row(y, height) {
                    canvas.set(x_col(x), row, '·');
                }
            }
        }
        for (&x, &m) in points.iter().zip(&means) {
            if let Some(row) = axis.row(m, height) {
                canvas.set(x_col(x), row, '█');
            }
        }
        for (&x, &y) in self.train_inputs.iter().zip(&self.train_targets) {
            if let Some(row) = axis.row(y, height) {
                canvas.set(x_col(x), row, 'x');
            }
        }
        for (&x, &p) in self.train_inputs.iter().zip(&train_preds) {
            if let Some(row) = axis.row(p, height) {
                canvas.set(x_col(x), row, 'o');
            }
        }

        let mut out = String::from("model output vs probe domain\n");
        for line in canvas.rows() {
            out.push_str("│");
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("└");
        out.push_str(&"─".repeat(width));
        out.push('\n');
        out.push_str("█ prediction  ░ spread  · truth  x target  o pred@train\n");
        out
    }
}

/// Display data for the classification variant: a 2-D probe plane plus
/// train/validation points with their binary class labels.
pub struct ClassificationView {
    probe: ProbeGrid,
    train: Vec<([f64; 2], bool)>,
    validation: Vec<([f64; 2], bool)>,
}

impl ClassificationView {
    /// Build the view and its probe plane.
    pub fn new(
        x_range: (f64, f64),
        y_range: (f64, f64),
        probe_resolution: usize,
        train: Vec<([f64; 2], bool)>,
        validation: Vec<([f64; 2], bool)>,
    ) -> Result<Self> {
        Ok(Self {
            probe: ProbeGrid::plane(x_range, y_range, probe_resolution)?,
            train,
            validation,
        })
    }

    pub fn probe(&self) -> &ProbeGrid {
        &self.probe
    }

    fn render(&self, model: &dyn ProbedModel, width: usize, height: usize) -> String {
        if width == 0 || height == 0 {
            return String::new();
        }
        let ProbeGrid::Plane { xs, ys } = &self.probe else {
            return String::from("(classification view needs a plane probe)\n");
        };

        let dim = model.output_dim();
        let probabilities = channel(&model.predict(&self.probe.flat_inputs()), dim, 0);
        let (nx, ny) = (xs.len(), ys.len());
        let (x_lo, x_hi) = (xs[0], xs[nx - 1]);
        let (y_lo, y_hi) = (ys[0], ys[ny - 1]);

        let mut canvas = Canvas::new(width, height);

        // Filled probability contour: each cell samples its nearest probe point.
        for row in 0..height {
            // Row 0 is the top of the panel = highest y.
            let iy = (height - 1 - row) * (ny - 1) / (height - 1).max(1);
            for col in 0..width {
                let ix = col * (nx - 1) / (width - 1).max(1);
                let p = probabilities[iy * nx + ix];
                let glyph = if p.is_finite() {
                    SHADE_CHARS[((p.clamp(0.0, 1.0) * 4.0).round() as usize).min(4)]
                } else {
                    '!'
                };
                canvas.set(col, row, glyph);
            }
        }

        let place = |canvas: &mut Canvas, point: [f64; 2], glyph: char| {
            let cx = ((point[0] - x_lo) / (x_hi - x_lo)).clamp(0.0, 1.0);
            let cy = ((point[1] - y_lo) / (y_hi - y_lo)).clamp(0.0, 1.0);
            let col = (cx * (width - 1) as f64).round() as usize;
            let row = ((1.0 - cy) * (height - 1) as f64).round() as usize;
            canvas.set(col, row, glyph);
        };

        for &(point, class_one) in &self.train {
            place(&mut canvas, point, if class_one { 'x' } else { 'o' });
        }
        for &(point, class_one) in &self.validation {
            place(&mut canvas, point, if class_one { 'X' } else { 'O' });
        }

        let mut out = String::from("class-1 probability landscape\n");
        for line in canvas.rows() {
            out.push_str("│");
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("└");
        out.push_str(&"─".repeat(width));
        out.push('\n');
        out.push_str("shade = p(class 1)  o/x train 0/1  O/X validation 0/1\n");
        out
    }
}

/// Which model-output panel the monitor draws, if any.
pub enum SurfacePanel {
    Regression(RegressionView),
    Classification(ClassificationView),
}

impl SurfacePanel {
    /// Render the panel against the current model state.
    pub fn render(&self, model: &dyn ProbedModel, width: usize, height: usize) -> String {
        match self {
            Self::Regression(view) => view.render(model, width, height),
            Self::Classification(view) => view.render(model, width, height),
        }
    }
}
