//! Risk scoring configuration
//!
//! Every coefficient the scorer uses lives here as a named, overridable
//! value. The defaults mirror the product's tuned demo constants; they are
//! illustrative, not empirically derived, and are deliberately left as-is.

use serde::{Deserialize, Serialize};

/// Sub-score weights - must sum to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub identity: f64,
    pub biometrics: f64,
    pub behavioral: f64,
    pub compliance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            identity: 0.30,
            biometrics: 0.25,
            behavioral: 0.20,
            compliance: 0.25,
        }
    }
}

/// Category band boundaries over the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryThresholds {
    /// Minimum overall for `low`
    pub low_min: u8,
    /// Minimum overall for `medium`
    pub medium_min: u8,
    /// Minimum overall for `high` (below is `critical`)
    pub high_min: u8,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            low_min: 85,
            medium_min: 70,
            high_min: 50,
        }
    }
}

/// Configuration for the risk engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub weights: ScoreWeights,

    #[serde(default)]
    pub thresholds: CategoryThresholds,

    // === Identity sub-score ===
    /// Bonus for passport documents
    #[serde(default = "default_passport_bonus")]
    pub passport_bonus: f64,
    /// Penalty for drivers licenses
    #[serde(default = "default_drivers_license_penalty")]
    pub drivers_license_penalty: f64,
    /// Expiry penalty tiers: (<30 days, <90 days, <365 days)
    #[serde(default = "default_expiry_penalties")]
    pub expiry_penalties: (f64, f64, f64),

    // === Behavioral sub-score ===
    /// Completion faster than this suggests automation (seconds)
    #[serde(default = "default_min_completion_secs")]
    pub min_completion_secs: u64,
    /// Completion slower than this suggests trouble (seconds)
    #[serde(default = "default_max_completion_secs")]
    pub max_completion_secs: u64,
    #[serde(default = "default_too_fast_penalty")]
    pub too_fast_penalty: f64,
    #[serde(default = "default_too_slow_penalty")]
    pub too_slow_penalty: f64,
    #[serde(default = "default_location_penalty")]
    pub location_penalty: f64,

    // === Compliance sub-score ===
    #[serde(default = "default_pep_penalty")]
    pub pep_penalty: f64,
    #[serde(default = "default_sanctions_penalty")]
    pub sanctions_penalty: f64,
    #[serde(default = "default_adverse_media_penalty")]
    pub adverse_media_penalty: f64,

    // === Confidence ===
    /// Half-width of the deterministic confidence jitter
    #[serde(default = "default_confidence_jitter")]
    pub confidence_jitter: u8,
    /// Confidence clamp bounds
    #[serde(default = "default_confidence_bounds")]
    pub confidence_bounds: (u8, u8),

    // === Flow adaptation ===
    /// Document quality below which medium-risk flows get enhanced identity
    #[serde(default = "default_enhanced_doc_quality_threshold")]
    pub enhanced_doc_quality_threshold: f64,
}

fn default_passport_bonus() -> f64 {
    5.0
}

fn default_drivers_license_penalty() -> f64 {
    2.0
}

fn default_expiry_penalties() -> (f64, f64, f64) {
    (20.0, 10.0, 5.0)
}

fn default_min_completion_secs() -> u64 {
    120
}

fn default_max_completion_secs() -> u64 {
    1800
}

fn default_too_fast_penalty() -> f64 {
    15.0
}

fn default_too_slow_penalty() -> f64 {
    10.0
}

fn default_location_penalty() -> f64 {
    25.0
}

fn default_pep_penalty() -> f64 {
    30.0
}

fn default_sanctions_penalty() -> f64 {
    50.0
}

fn default_adverse_media_penalty() -> f64 {
    20.0
}

fn default_confidence_jitter() -> u8 {
    5
}

fn default_confidence_bounds() -> (u8, u8) {
    (60, 95)
}

fn default_enhanced_doc_quality_threshold() -> f64 {
    80.0
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            thresholds: CategoryThresholds::default(),
            passport_bonus: default_passport_bonus(),
            drivers_license_penalty: default_drivers_license_penalty(),
            expiry_penalties: default_expiry_penalties(),
            min_completion_secs: default_min_completion_secs(),
            max_completion_secs: default_max_completion_secs(),
            too_fast_penalty: default_too_fast_penalty(),
            too_slow_penalty: default_too_slow_penalty(),
            location_penalty: default_location_penalty(),
            pep_penalty: default_pep_penalty(),
            sanctions_penalty: default_sanctions_penalty(),
            adverse_media_penalty: default_adverse_media_penalty(),
            confidence_jitter: default_confidence_jitter(),
            confidence_bounds: default_confidence_bounds(),
            enhanced_doc_quality_threshold: default_enhanced_doc_quality_threshold(),
        }
    }
}

impl RiskConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
