//! Metric history with exponential smoothing.
//!
//! Stores one raw and one smoothed sequence per metric, appended once per
//! epoch. The key set is fixed by the first recorded snapshot; every later
//! snapshot must carry exactly the same keys, so the sequences can never
//! fall out of alignment.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::{MonitorError, Result};

/// Per-series summary: minimum raw value, last smoothed value, and the
/// epoch at which the raw minimum was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub min: Option<f64>,
    pub last_smoothed: Option<f64>,
    pub best_epoch: Option<usize>,
}

/// Raw and exponentially smoothed metric sequences, one pair per key.
///
/// Smoothing recurrence with factor α ∈ [0, 1):
///
/// ```text
/// smoothed[0] = raw[0]
/// smoothed[t] = (1 - α)·raw[t] + α·smoothed[t-1]
/// ```
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use vigilar::MetricHistory;
///
/// let mut history = MetricHistory::new(0.5).unwrap();
/// for v in [1.0, 3.0, 5.0] {
///     let snapshot = BTreeMap::from([("loss".to_string(), v)]);
///     history.record(history.len(), &snapshot).unwrap();
/// }
/// assert_eq!(history.raw("loss"), Some(&[1.0, 3.0, 5.0][..]));
/// assert_eq!(history.smoothed("loss"), Some(&[1.0, 2.0, 3.5][..]));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct MetricHistory {
    /// Key set in first-snapshot iteration order. Fixed once `started`.
    keys: Vec<String>,
    raw: HashMap<String, Vec<f64>>,
    smoothed: HashMap<String, Vec<f64>>,
    smoothing: f64,
    /// Whether the first snapshot has been recorded. Tracked separately
    /// from `keys` so an empty first snapshot still fixes the key set.
    started: bool,
    /// Accepted epochs; equals every sequence's length.
    epochs: usize,
}

impl MetricHistory {
    /// Create an empty history with the given smoothing factor.
    ///
    /// Fails fast if `smoothing` is outside `[0, 1)`.
    pub fn new(smoothing: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&smoothing) || !smoothing.is_finite() {
            return Err(MonitorError::InvalidSmoothing { value: smoothing });
        }
        Ok(Self {
            keys: Vec::new(),
            raw: HashMap::new(),
            smoothed: HashMap::new(),
            smoothing,
            started: false,
            epochs: 0,
        })
    }

    /// Append one epoch's metric snapshot.
    ///
    /// The first call fixes the key set. Later calls are validated against
    /// it *before* anything is appended: a missing or unexpected key rejects
    /// the whole snapshot, leaving every sequence untouched and aligned.
    pub fn record(&mut self, epoch: usize, snapshot: &BTreeMap<String, f64>) -> Result<()> {
        if !self.started {
            self.started = true;
            self.keys = snapshot.keys().cloned().collect();
            for key in &self.keys {
                self.raw.insert(key.clone(), Vec::new());
                self.smoothed.insert(key.clone(), Vec::new());
            }
        } else {
            let missing: Vec<&str> = self
                .keys
                .iter()
                .filter(|k| !snapshot.contains_key(k.as_str()))
                .map(String::as_str)
                .collect();
            let unexpected: Vec<&str> = snapshot
                .keys()
                .filter(|k| !self.keys.contains(k))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() || !unexpected.is_empty() {
                return Err(MonitorError::MetricKeyDrift {
                    epoch,
                    missing: missing.join(", "),
                    unexpected: unexpected.join(", "),
                });
            }
        }

        // Keys were validated above, so both maps contain every key.
        for key in &self.keys {
            let value = snapshot[key];
            if let Some(series) = self.raw.get_mut(key) {
                series.push(value);
            }
            if let Some(series) = self.smoothed.get_mut(key) {
                let next = match series.last() {
                    Some(prev) => (1.0 - self.smoothing) * value + self.smoothing * prev,
                    None => value,
                };
                series.push(next);
            }
        }
        self.epochs += 1;
        Ok(())
    }

    /// Number of recorded epochs; every sequence has exactly this length.
    pub fn len(&self) -> usize {
        self.epochs
    }

    /// Whether no epochs have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metric keys in the order fixed by the first snapshot.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Raw sequence for a key, one value per epoch.
    pub fn raw(&self, key: &str) -> Option<&[f64]> {
        self.raw.get(key).map(Vec::as_slice)
    }

    /// Smoothed sequence for a key; always the same length as the raw one.
    pub fn smoothed(&self, key: &str) -> Option<&[f64]> {
        self.smoothed.get(key).map(Vec::as_slice)
    }

    /// Smoothing factor this history was built with.
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Summary of every tracked series.
    pub fn summary(&self) -> Vec<SeriesSummary> {
        self.keys
            .iter()
            .map(|key| {
                let raw = &self.raw[key];
                let min = raw.iter().copied().reduce(f64::min);
                let best_epoch = min.and_then(|m| raw.iter().position(|&v| v == m));
                SeriesSummary {
                    name: key.clone(),
                    min,
                    last_smoothed: self.smoothed[key].last().copied(),
                    best_epoch,
                }
            })
            .collect()
    }

    /// `true` if any recorded value is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.raw
            .values()
            .any(|series| series.iter().any(|v| !v.is_finite()))
    }

    /// Serialize raw and smoothed sequences to a JSON string.
    ///
    /// Keys are sorted for deterministic output.
    pub fn to_json(&self) -> String {
        let sorted: BTreeMap<&str, BTreeMap<&str, &Vec<f64>>> = self
            .keys
            .iter()
            .map(|k| {
                (
                    k.as_str(),
                    BTreeMap::from([("raw", &self.raw[k]), ("smoothed", &self.smoothed[k])]),
                )
            })
            .collect();
        serde_json::to_string_pretty(&sorted).unwrap_or_else(|e| {
            eprintln!("MetricHistory JSON serialization failed: {e}");
            "{}".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snap(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_new_rejects_bad_smoothing() {
        assert!(MetricHistory::new(-0.1).is_err());
        assert!(MetricHistory::new(1.0).is_err());
        assert!(MetricHistory::new(f64::NAN).is_err());
        assert!(MetricHistory::new(0.0).is_ok());
        assert!(MetricHistory::new(0.999).is_ok());
    }

    #[test]
    fn test_record_appends_all_keys() {
        let mut history = MetricHistory::new(0.0).unwrap();
        history
            .record(0, &snap(&[("loss", 1.0), ("acc", 0.5)]))
            .unwrap();
        history
            .record(1, &snap(&[("loss", 0.5), ("acc", 0.7)]))
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.raw("loss"), Some(&[1.0, 0.5][..]));
        assert_eq!(history.raw("acc"), Some(&[0.5, 0.7][..]));
        assert_eq!(history.keys(), &["acc".to_string(), "loss".to_string()]);
    }

    #[test]
    fn test_smoothing_recurrence_known_values() {
        // raw [1, 3, 5] with α = 0.5 → smoothed [1, 2, 3.5]
        let mut history = MetricHistory::new(0.5).unwrap();
        for (epoch, v) in [1.0, 3.0, 5.0].into_iter().enumerate() {
            history.record(epoch, &snap(&[("loss", v)])).unwrap();
        }
        let smoothed = history.smoothed("loss").unwrap();
        assert_relative_eq!(smoothed[0], 1.0);
        assert_relative_eq!(smoothed[1], 2.0);
        assert_relative_eq!(smoothed[2], 3.5);
    }

    #[test]
    fn test_constant_input_does_not_drift() {
        let mut history = MetricHistory::new(0.9).unwrap();
        for epoch in 0..50 {
            history.record(epoch, &snap(&[("loss", 4.25)])).unwrap();
        }
        for &v in history.smoothed("loss").unwrap() {
            assert_relative_eq!(v, 4.25);
        }
    }

    #[test]
    fn test_zero_smoothing_means_raw_equals_smoothed() {
        let mut history = MetricHistory::new(0.0).unwrap();
        for (epoch, v) in [1.0, 0.5, 0.25].into_iter().enumerate() {
            history.record(epoch, &snap(&[("loss", v)])).unwrap();
        }
        assert_eq!(history.raw("loss"), history.smoothed("loss"));
    }

    #[test]
    fn test_missing_key_is_rejected_without_misalignment() {
        let mut history = MetricHistory::new(0.0).unwrap();
        history
            .record(0, &snap(&[("loss", 1.0), ("acc", 0.5)]))
            .unwrap();

        let err = history.record(1, &snap(&[("loss", 0.5)])).unwrap_err();
        assert!(matches!(err, MonitorError::MetricKeyDrift { epoch: 1, .. }));

        // Nothing was appended; sequences stay aligned.
        assert_eq!(history.len(), 1);
        assert_eq!(history.raw("loss").unwrap().len(), 1);
        assert_eq!(history.raw("acc").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_first_snapshot_fixes_empty_key_set() {
        let mut history = MetricHistory::new(0.0).unwrap();
        history.record(0, &BTreeMap::new()).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.keys().is_empty());

        // The key set was fixed (to nothing); a key appearing later is drift.
        let err = history.record(1, &snap(&[("loss", 1.0)])).unwrap_err();
        match err {
            MonitorError::MetricKeyDrift { unexpected, .. } => {
                assert_eq!(unexpected, "loss");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(history.len(), 1);
        assert_eq!(history.raw("loss"), None);
    }

    #[test]
    fn test_new_key_is_rejected() {
        let mut history = MetricHistory::new(0.0).unwrap();
        history.record(0, &snap(&[("loss", 1.0)])).unwrap();

        let err = history
            .record(1, &snap(&[("loss", 0.5), ("lr", 1e-3)]))
            .unwrap_err();
        match err {
            MonitorError::MetricKeyDrift { unexpected, .. } => {
                assert_eq!(unexpected, "lr");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_smoothed_length_tracks_raw_length() {
        let mut history = MetricHistory::new(0.8).unwrap();
        for epoch in 0..7 {
            history
                .record(epoch, &snap(&[("loss", epoch as f64)]))
                .unwrap();
            assert_eq!(
                history.raw("loss").unwrap().len(),
                history.smoothed("loss").unwrap().len()
            );
        }
    }

    #[test]
    fn test_summary_reports_min_and_best_epoch() {
        let mut history = MetricHistory::new(0.0).unwrap();
        for (epoch, v) in [1.0, 0.25, 0.5].into_iter().enumerate() {
            history.record(epoch, &snap(&[("loss", v)])).unwrap();
        }
        let summary = history.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].name, "loss");
        assert_eq!(summary[0].min, Some(0.25));
        assert_eq!(summary[0].best_epoch, Some(1));
        assert_eq!(summary[0].last_smoothed, Some(0.5));
    }

    #[test]
    fn test_summary_empty_history() {
        let history = MetricHistory::new(0.5).unwrap();
        assert!(history.summary().is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_has_non_finite() {
        let mut history = MetricHistory::new(0.0).unwrap();
        history.record(0, &snap(&[("loss", 1.0)])).unwrap();
        assert!(!history.has_non_finite());
        history.record(1, &snap(&[("loss", f64::NAN)])).unwrap();
        assert!(history.has_non_finite());
    }

    #[test]
    fn test_to_json_sorted_and_complete() {
        let mut history = MetricHistory::new(0.0).unwrap();
        history
            .record(0, &snap(&[("zeta", 1.0), ("alpha", 2.0)]))
            .unwrap();

        let json = history.to_json();
        let alpha = json.find("alpha").expect("alpha missing");
        let zeta = json.find("zeta").expect("zeta missing");
        assert!(alpha < zeta);
        assert!(json.contains("raw"));
        assert!(json.contains("smoothed"));
    }

    #[test]
    fn test_unknown_key_accessors_return_none() {
        let history = MetricHistory::new(0.5).unwrap();
        assert_eq!(history.raw("nope"), None);
        assert_eq!(history.smoothed("nope"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// All sequences stay equal-length no matter the input values.
        #[test]
        fn sequences_stay_aligned(
            values in proptest::collection::vec(-1e6f64..1e6, 1..64),
            alpha in 0.0f64..0.999,
        ) {
            let mut history = MetricHistory::new(alpha).unwrap();
            for (epoch, &v) in values.iter().enumerate() {
                let snapshot = BTreeMap::from([
                    ("loss".to_string(), v),
                    ("acc".to_string(), -v),
                ]);
                history.record(epoch, &snapshot).unwrap();
            }
            let n = values.len();
            for key in ["loss", "acc"] {
                prop_assert_eq!(history.raw(key).unwrap().len(), n);
                prop_assert_eq!(history.smoothed(key).unwrap().len(), n);
            }
        }

        /// The smoothing recurrence holds exactly at every step.
        #[test]
        fn smoothing_recurrence_holds(
            values in proptest::collection::vec(-1e3f64..1e3, 2..32),
            alpha in 0.0f64..0.999,
        ) {
            let mut history = MetricHistory::new(alpha).unwrap();
            for (epoch, &v) in values.iter().enumerate() {
                let snapshot = BTreeMap::from([("loss".to_string(), v)]);
                history.record(epoch, &snapshot).unwrap();
            }
            let raw = history.raw("loss").unwrap();
            let smoothed = history.smoothed("loss").unwrap();
            prop_assert_eq!(smoothed[0], raw[0]);
            for t in 1..raw.len() {
                let expected = (1.0 - alpha) * raw[t] + alpha * smoothed[t - 1];
                prop_assert!((smoothed[t] - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}
