//! Model performance metrics
//!
//! Append-only history: one entry per resolved case with a reviewer
//! decision. The derived precision/recall/F1/FPR/FNR figures are the
//! accuracy scaled by fixed illustrative coefficients - a mock feedback
//! loop, not an ML evaluation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PRECISION_COEF: f64 = 0.95;
const RECALL_COEF: f64 = 0.92;
const F1_COEF: f64 = 0.93;
const FPR_COEF: f64 = 0.90;
const FNR_COEF: f64 = 0.85;

/// Direction of the accuracy trend versus the prior entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementTrend {
    Improving,
    Stable,
    Declining,
}

/// One metrics snapshot (all rates 0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
    pub total_cases: u64,
    pub correct_predictions: u64,
    pub trend: ImprovementTrend,
}

/// Running tally with an append-only snapshot history
#[derive(Debug, Default)]
pub struct MetricsHistory {
    total: u64,
    correct: u64,
    entries: Vec<ModelMetrics>,
}

impl MetricsHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one prediction outcome and append a snapshot
    pub fn record(&mut self, correct: bool, version: &str, now: DateTime<Utc>) -> &ModelMetrics {
        self.total += 1;
        if correct {
            self.correct += 1;
        }

        let accuracy = (self.correct as f64 / self.total as f64) * 100.0;
        let trend = match self.entries.last() {
            Some(prior) if accuracy > prior.accuracy => ImprovementTrend::Improving,
            Some(prior) if accuracy < prior.accuracy => ImprovementTrend::Declining,
            Some(_) => ImprovementTrend::Stable,
            None => ImprovementTrend::Stable,
        };

        let entry = ModelMetrics {
            version: version.to_string(),
            timestamp: now,
            accuracy,
            precision: accuracy * PRECISION_COEF,
            recall: accuracy * RECALL_COEF,
            f1: accuracy * F1_COEF,
            false_positive_rate: accuracy * FPR_COEF,
            false_negative_rate: accuracy * FNR_COEF,
            total_cases: self.total,
            correct_predictions: self.correct,
            trend,
        };

        self.entries.push(entry);
        self.entries.last().expect("entry just pushed")
    }

    /// Latest snapshot, if any
    pub fn latest(&self) -> Option<&ModelMetrics> {
        self.entries.last()
    }

    /// Full append-only history
    pub fn entries(&self) -> &[ModelMetrics] {
        &self.entries
    }

    /// Total recorded predictions
    pub fn total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entry_is_stable() {
        let mut history = MetricsHistory::new();
        let entry = history.record(true, "model-1", Utc::now());

        assert_eq!(entry.accuracy, 100.0);
        assert_eq!(entry.trend, ImprovementTrend::Stable);
        assert_eq!(entry.total_cases, 1);
        assert_eq!(entry.correct_predictions, 1);
    }

    #[test]
    fn test_accuracy_is_running_ratio() {
        let mut history = MetricsHistory::new();
        let now = Utc::now();

        history.record(true, "m", now);
        history.record(false, "m", now);
        let entry = history.record(true, "m", now).clone();

        assert!((entry.accuracy - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(entry.total_cases, 3);
        assert_eq!(entry.correct_predictions, 2);
    }

    #[test]
    fn test_trend_tracks_accuracy_direction() {
        let mut history = MetricsHistory::new();
        let now = Utc::now();

        history.record(true, "m", now); // 100%
        let declining = history.record(false, "m", now).trend; // 50%
        assert_eq!(declining, ImprovementTrend::Declining);

        let improving = history.record(true, "m", now).trend; // 66.7%
        assert_eq!(improving, ImprovementTrend::Improving);
    }

    #[test]
    fn test_derived_rates_use_fixed_coefficients() {
        let mut history = MetricsHistory::new();
        let entry = history.record(true, "m", Utc::now()).clone();

        assert_eq!(entry.precision, 95.0);
        assert_eq!(entry.recall, 92.0);
        assert_eq!(entry.f1, 93.0);
        assert_eq!(entry.false_positive_rate, 90.0);
        assert_eq!(entry.false_negative_rate, 85.0);
    }

    #[test]
    fn test_history_is_append_only() {
        let mut history = MetricsHistory::new();
        let now = Utc::now();

        for i in 0..5 {
            history.record(i % 2 == 0, "m", now);
        }

        assert_eq!(history.entries().len(), 5);
        assert_eq!(history.latest().unwrap().total_cases, 5);
    }
}
