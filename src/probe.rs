//! Probe grids: fixed synthetic inputs used only for visualization.

use serde::Serialize;

use crate::error::{MonitorError, Result};

/// Evenly spaced values over `[lo, hi]`, endpoints included.
fn linspace(lo: f64, hi: f64, resolution: usize) -> Vec<f64> {
    let step = (hi - lo) / (resolution - 1) as f64;
    (0..resolution).map(|i| lo + i as f64 * step).collect()
}

fn check_range(lo: f64, hi: f64) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(MonitorError::InvalidProbeRange { lo, hi });
    }
    Ok(())
}

fn check_resolution(resolution: usize) -> Result<()> {
    if resolution < 2 {
        return Err(MonitorError::InvalidProbeResolution { got: resolution });
    }
    Ok(())
}

/// A fixed set of probe inputs, generated once and never mutated.
///
/// The monitor evaluates the observed model over these points purely for
/// display; they take no part in training.
#[derive(Debug, Clone, Serialize)]
pub enum ProbeGrid {
    /// 1-D line of probe points (regression variant).
    Line { points: Vec<f64> },
    /// 2-D plane of probe points (classification-landscape variant),
    /// stored as the two axes; the full grid is their cross product.
    Plane { xs: Vec<f64>, ys: Vec<f64> },
}

impl ProbeGrid {
    /// Dense line over `[lo, hi]` with `resolution` points.
    pub fn line(lo: f64, hi: f64, resolution: usize) -> Result<Self> {
        check_range(lo, hi)?;
        check_resolution(resolution)?;
        Ok(Self::Line {
            points: linspace(lo, hi, resolution),
        })
    }

    /// Dense plane over `x_range × y_range` with `resolution` points per axis.
    pub fn plane(x_range: (f64, f64), y_range: (f64, f64), resolution: usize) -> Result<Self> {
        check_range(x_range.0, x_range.1)?;
        check_range(y_range.0, y_range.1)?;
        check_resolution(resolution)?;
        Ok(Self::Plane {
            xs: linspace(x_range.0, x_range.1, resolution),
            ys: linspace(y_range.0, y_range.1, resolution),
        })
    }

    /// Number of probe points.
    pub fn len(&self) -> usize {
        match self {
            Self::Line { points } => points.len(),
            Self::Plane { xs, ys } => xs.len() * ys.len(),
        }
    }

    /// A probe grid is never empty; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Input dimensionality of each probe point.
    pub fn input_dim(&self) -> usize {
        match self {
            Self::Line { .. } => 1,
            Self::Plane { .. } => 2,
        }
    }

    /// Probe points as a row-major flat batch suitable for
    /// [`ProbedModel::predict`](crate::ProbedModel::predict).
    ///
    /// For a plane, rows iterate y-major: all x values for the first y,
    /// then the next y, and so on.
    pub fn flat_inputs(&self) -> Vec<f64> {
        match self {
            Self::Line { points } => points.clone(),
            Self::Plane { xs, ys } => {
                let mut flat = Vec::with_capacity(xs.len() * ys.len() * 2);
                for &y in ys {
                    for &x in xs {
                        flat.push(x);
                        flat.push(y);
                    }
                }
                flat
            }
        }
    }
}
