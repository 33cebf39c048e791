//! Character canvas and value-to-row mapping for terminal plots.

use super::AxisScale;

/// Fixed-size character grid that plots draw onto.
///
/// Row 0 is the top line. Out-of-range writes are ignored so callers can
/// plot without bounds bookkeeping.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Write a glyph; silently ignores out-of-range coordinates.
    pub fn set(&mut self, col: usize, row: usize, glyph: char) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = glyph;
        }
    }

    /// Glyph at a position, if in range.
    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Whether a cell is still blank.
    pub fn is_blank(&self, col: usize, row: usize) -> bool {
        self.get(col, row) == Some(' ')
    }

    /// One string per row, top to bottom.
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|r| {
                self.cells[r * self.width..(r + 1) * self.width]
                    .iter()
                    .collect()
            })
            .collect()
    }
}

/// Maps metric values onto canvas rows, top row = highest value.
///
/// For [`AxisScale::Log`], values are mapped through `ln`; non-positive
/// values are clamped to the smallest positive value seen. A series with no
/// positive values falls back to a linear mapping.
#[derive(Debug, Clone, Copy)]
pub struct YAxis {
    lo: f64,
    hi: f64,
    log: bool,
}

impl YAxis {
    /// Fit an axis to the finite values in `values`.
    pub fn fit<'a, I>(values: I, scale: AxisScale) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let finite: Vec<f64> = values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();

        let log = scale == AxisScale::Log && finite.iter().any(|&v| v > 0.0);
        let mapped: Vec<f64> = if log {
            finite.iter().filter(|&&v| v > 0.0).map(|v| v.ln()).collect()
        } else {
            finite
        };

        let lo = mapped.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = mapped.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo > hi {
            // No finite values at all; any mapping works.
            return Self { lo: 0.0, hi: 1.0, log: false };
        }
        Self { lo, hi, log }
    }

    /// Canvas row for a value, or `None` for non-finite input.
    pub fn row(&self, value: f64, height: usize) -> Option<usize> {
        if !value.is_finite() || height == 0 {
            return None;
        }
        let v = if self.log {
            value.max(self.lo.exp()).ln()
        } else {
            value
        };
        let range = self.hi - self.lo;
        let normalized = if range.abs() < f64::EPSILON {
            0.5
        } else {
            ((v - self.lo) / range).clamp(0.0, 1.0)
        };
        Some(((1.0 - normalized) * (height - 1) as f64).round() as usize)
    }

    /// Axis bound in value space (`top` = upper bound).
    pub fn bound(&self, top: bool) -> f64 {
        let v = if top { self.hi } else { self.lo };
        if self.log {
            v.exp()
        } else {
            v
        }
    }
}
