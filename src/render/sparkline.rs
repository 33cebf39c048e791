//! Unicode sparklines for compact inline series display.

/// Block glyphs from lowest to highest.
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a value series as a one-line sparkline.
///
/// Series longer than `width` are subsampled; constant series render as a
/// run of the middle glyph. Non-finite values render as `!`.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let values: Vec<f64> = if values.len() > width {
        let step = values.len() as f64 / width as f64;
        (0..width)
            .map(|i| values[((i as f64 * step) as usize).min(values.len() - 1)])
            .collect()
    } else {
        values.to_vec()
    };

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                '!'
            } else if range < f64::EPSILON {
                SPARK_CHARS[4]
            } else {
                let normalized = (v - min) / range;
                SPARK_CHARS[((normalized * 7.0).round() as usize).min(7)]
            }
        })
        .collect()
}
