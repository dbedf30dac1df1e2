//! Learning loop configuration
//!
//! The misprediction bounds and adjustment factors are the product's demo
//! constants, kept as named overridable values rather than improved guesses.

use serde::{Deserialize, Serialize};

/// Configuration for the fraud-learning feedback loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Whether reviews trigger feedback generation at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// AI score above this with a false-positive review is a misprediction
    #[serde(default = "default_high_score_bound")]
    pub high_score_bound: f64,

    /// AI score below this with a confirmed-fraud review is a misprediction
    #[serde(default = "default_low_score_bound")]
    pub low_score_bound: f64,

    /// Weight scale-up when the human confirmed fraud
    #[serde(default = "default_scale_up")]
    pub scale_up: f64,

    /// Weight scale-down when the human said false positive
    #[serde(default = "default_scale_down")]
    pub scale_down: f64,

    /// Rule accuracy estimate when the review confirmed the flag
    #[serde(default = "default_rule_accuracy_confirmed")]
    pub rule_accuracy_confirmed: f64,

    /// Rule accuracy estimate when the review rejected the flag
    #[serde(default = "default_rule_accuracy_false_positive")]
    pub rule_accuracy_false_positive: f64,

    /// Rule accuracy below this suggests a sensitivity change
    #[serde(default = "default_rule_accuracy_floor")]
    pub rule_accuracy_floor: f64,

    /// Half-width of the borderline band around the 50 boundary
    #[serde(default = "default_borderline_band")]
    pub borderline_band: f64,

    /// Threshold nudge step
    #[serde(default = "default_threshold_nudge")]
    pub threshold_nudge: f64,

    /// Cap on the aggregate expected accuracy improvement
    #[serde(default = "default_improvement_cap")]
    pub improvement_cap: f64,

    /// Per-anomaly contribution to the behavioral feature score
    #[serde(default = "default_anomaly_weight")]
    pub anomaly_weight: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_high_score_bound() -> f64 {
    70.0
}

fn default_low_score_bound() -> f64 {
    30.0
}

fn default_scale_up() -> f64 {
    1.2
}

fn default_scale_down() -> f64 {
    0.8
}

fn default_rule_accuracy_confirmed() -> f64 {
    85.0
}

fn default_rule_accuracy_false_positive() -> f64 {
    45.0
}

fn default_rule_accuracy_floor() -> f64 {
    60.0
}

fn default_borderline_band() -> f64 {
    20.0
}

fn default_threshold_nudge() -> f64 {
    5.0
}

fn default_improvement_cap() -> f64 {
    15.0
}

fn default_anomaly_weight() -> f64 {
    25.0
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            high_score_bound: default_high_score_bound(),
            low_score_bound: default_low_score_bound(),
            scale_up: default_scale_up(),
            scale_down: default_scale_down(),
            rule_accuracy_confirmed: default_rule_accuracy_confirmed(),
            rule_accuracy_false_positive: default_rule_accuracy_false_positive(),
            rule_accuracy_floor: default_rule_accuracy_floor(),
            borderline_band: default_borderline_band(),
            threshold_nudge: default_threshold_nudge(),
            improvement_cap: default_improvement_cap(),
            anomaly_weight: default_anomaly_weight(),
        }
    }
}

impl LearningConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
