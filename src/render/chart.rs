//! Metric-curve chart: raw sequence faint, smoothed sequence solid.

use crate::history::MetricHistory;

use super::canvas::{Canvas, YAxis};
use super::sparkline::sparkline;
use super::AxisScale;

const RAW_GLYPH: char = '·';
const SMOOTH_GLYPH: char = '█';
const LABEL_WIDTH: usize = 10;

/// Renders one curve block per tracked metric.
///
/// Each block shows the raw values as faint dots and the smoothed values as
/// solid blocks over the epoch axis, with the configured y-axis scale and
/// the bounds printed on the top and bottom rows.
#[derive(Debug, Clone)]
pub struct MetricsChart {
    width: usize,
    height: usize,
    scale: AxisScale,
}

impl MetricsChart {
    pub fn new(width: usize, height: usize, scale: AxisScale) -> Self {
        Self { width, height, scale }
    }

    /// Column for epoch `t` out of `n` recorded epochs.
    fn col(&self, t: usize, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        if n <= self.width {
            t * (self.width - 1) / (n - 1)
        } else {
            t * self.width / n
        }
    }

    fn render_series(&self, name: &str, raw: &[f64], smoothed: &[f64]) -> String {
        let n = raw.len();
        let axis = YAxis::fit(raw.iter().chain(smoothed), self.scale);
        let mut canvas = Canvas::new(self.width, self.height);

        // Raw first so the smoothed curve overwrites it where they meet.
        for (t, &v) in raw.iter().enumerate() {
            if let Some(row) = axis.row(v, self.height) {
                canvas.set(self.col(t, n), row, RAW_GLYPH);
            }
        }
        for (t, &v) in smoothed.iter().enumerate() {
            if let Some(row) = axis.row(v, self.height) {
                canvas.set(self.col(t, n), row, SMOOTH_GLYPH);
            }
        }

        let non_finite = raw.iter().any(|v| !v.is_finite());
        let mut out = format!(
            "{name} {}  last={:.4}{}\n",
            sparkline(smoothed, 20),
            smoothed.last().copied().unwrap_or(f64::NAN),
            if non_finite { "  [non-finite values]" } else { "" },
        );
        for (row, line) in canvas.rows().into_iter().enumerate() {
            let label = if row == 0 {
                format!("{:>LABEL_WIDTH$.3e}", axis.bound(true))
            } else if row == self.height - 1 {
                format!("{:>LABEL_WIDTH$.3e}", axis.bound(false))
            } else {
                " ".repeat(LABEL_WIDTH)
            };
            out.push_str(&format!("{label} │{line}\n"));
        }
        out.push_str(&format!(
            "{} └{}  epochs 0..{}\n",
            " ".repeat(LABEL_WIDTH),
            "─".repeat(self.width),
            n.saturating_sub(1),
        ));
        out
    }

    /// Render every tracked metric into one multi-block string.
    pub fn render(&self, history: &MetricHistory) -> String {
        if history.is_empty() {
            return String::from("(no metrics recorded yet)\n");
        }
        let mut out = String::new();
        for key in history.keys() {
            // Both sequences exist for every tracked key.
            let (Some(raw), Some(smoothed)) = (history.raw(key), history.smoothed(key)) else {
                continue;
            };
            out.push_str(&self.render_series(key, raw, smoothed));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn history_with(values: &[f64], alpha: f64) -> MetricHistory {
        let mut history = MetricHistory::new(alpha).unwrap();
        for (epoch, &v) in values.iter().enumerate() {
            let snapshot = BTreeMap::from([("loss".to_string(), v)]);
            history.record(epoch, &snapshot).unwrap();
        }
        history
    }

    #[test]
    fn test_render_empty_history() {
        let chart = MetricsChart::new(32, 8, AxisScale::Linear);
        let history = MetricHistory::new(0.5).unwrap();
        assert!(chart.render(&history).contains("no metrics"));
    }

    #[test]
    fn test_render_contains_name_and_glyphs() {
        let chart = MetricsChart::new(32, 8, AxisScale::Linear);
        let history = history_with(&[1.0, 0.5, 0.25, 0.125], 0.5);
        let out = chart.render(&history);
        assert!(out.contains("loss"));
        assert!(out.contains(SMOOTH_GLYPH));
        assert!(out.contains(RAW_GLYPH));
        assert!(out.contains("epochs 0..3"));
    }

    #[test]
    fn test_render_shows_axis_bounds() {
        let chart = MetricsChart::new(32, 8, AxisScale::Linear);
        let history = history_with(&[0.0, 10.0], 0.0);
        let out = chart.render(&history);
        assert!(out.contains("1.000e1"));
        assert!(out.contains("0.000e0"));
    }

    #[test]
    fn test_render_flags_non_finite() {
        let chart = MetricsChart::new(32, 8, AxisScale::Linear);
        let history = history_with(&[1.0, f64::NAN], 0.0);
        assert!(chart.render(&history).contains("[non-finite values]"));
    }

    #[test]
    fn test_render_one_block_per_metric() {
        let chart = MetricsChart::new(32, 6, AxisScale::Linear);
        let mut history = MetricHistory::new(0.0).unwrap();
        let snapshot = BTreeMap::from([
            ("loss".to_string(), 1.0),
            ("val_loss".to_string(), 2.0),
        ]);
        history.record(0, &snapshot).unwrap();

        let out = chart.render(&history);
        assert!(out.contains("loss"));
        assert!(out.contains("val_loss"));
    }

    #[test]
    fn test_log_scale_renders() {
        let chart = MetricsChart::new(32, 8, AxisScale::Log);
        let history = history_with(&[100.0, 10.0, 1.0, 0.1], 0.5);
        let out = chart.render(&history);
        assert!(out.contains("loss"));
        assert!(out.contains(SMOOTH_GLYPH));
    }

    #[test]
    fn test_columns_subsample_long_runs() {
        let chart = MetricsChart::new(16, 4, AxisScale::Linear);
        // More epochs than columns must still stay within the canvas.
        assert!(chart.col(99, 100) < 16);
        assert_eq!(chart.col(0, 100), 0);
        assert_eq!(chart.col(0, 1), 0);
        assert_eq!(chart.col(9, 10), 15);
    }
}
