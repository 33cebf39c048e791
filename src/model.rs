//! Seam between the monitor and the observed model.

/// Read-only view of a model under training.
///
/// The monitor never mutates model state: [`predict`](Self::predict) runs a
/// forward pass for display purposes, and [`parameters`](Self::parameters) is
/// a point-in-time read of the full parameter state.
pub trait ProbedModel {
    /// Number of input features per sample.
    fn input_dim(&self) -> usize;

    /// Number of output channels per sample. For the regression variant,
    /// a second channel is interpreted as a spread estimate around the
    /// first (mean) channel.
    fn output_dim(&self) -> usize;

    /// Outputs for a row-major batch.
    ///
    /// `inputs.len()` must be a multiple of [`input_dim`](Self::input_dim);
    /// the result is row-major with [`output_dim`](Self::output_dim) values
    /// per input row.
    fn predict(&self, inputs: &[f64]) -> Vec<f64>;

    /// All current parameters, flattened in a stable order.
    fn parameters(&self) -> Vec<f32>;
}
