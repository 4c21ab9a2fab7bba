use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::SimResult;

/// An observer that samples the environment once per tick.
///
/// Instruments are updated in registration order after every agent has
/// moved. Each update appends exactly one value to the instrument's metric;
/// the series is never trimmed or reset during a run.
pub trait Instrument: std::fmt::Debug {
    /// Human-readable name for this instrument.
    fn name(&self) -> &str;

    /// Take one sample from the environment and append it to the metric.
    fn update(&mut self, env: &Environment) -> SimResult<()>;

    /// All samples recorded so far, oldest first.
    fn metric(&self) -> &[f64];

    /// Summarize the recorded series for a reporting collaborator.
    fn report(&self) -> Report {
        Report::new(self.name(), self.metric().to_vec())
    }

    /// Support downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// A named time series handed to plotting or printing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the instrument that produced the series.
    pub name: String,
    /// One sample per tick; index 0 is tick 1.
    pub metric: Vec<f64>,
}

impl Report {
    /// Create a report from a name and a series.
    pub fn new(name: impl Into<String>, metric: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            metric,
        }
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<f64> {
        self.metric.last().copied()
    }

    /// The largest sample.
    pub fn peak(&self) -> Option<f64> {
        self.metric.iter().copied().reduce(f64::max)
    }

    /// First tick (1-based) at which the series reached at least `value`.
    pub fn first_tick_reaching(&self, value: f64) -> Option<u64> {
        self.metric
            .iter()
            .position(|v| *v >= value)
            .map(|i| i as u64 + 1)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.metric.len()
    }

    /// Return `true` if nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.metric.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_summaries() {
        let report = Report::new("escaped", vec![0.0, 1.0, 1.0, 3.0, 2.0]);
        assert_eq!(report.latest(), Some(2.0));
        assert_eq!(report.peak(), Some(3.0));
        assert_eq!(report.first_tick_reaching(1.0), Some(2));
        assert_eq!(report.first_tick_reaching(3.0), Some(4));
        assert_eq!(report.first_tick_reaching(4.0), None);
        assert_eq!(report.len(), 5);
    }

    #[test]
    fn empty_report() {
        let report = Report::new("escaped", Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.latest(), None);
        assert_eq!(report.peak(), None);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = Report::new("escaped", vec![0.0, 2.0]);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"name":"escaped","metric":[0.0,2.0]}"#);
    }
}
