//! Risk score and category
//!
//! Categories are ordered from safest to riskiest; the boundaries are the
//! fixed bands 85/70/50 over the 0-100 overall score (higher = safer).

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CategoryThresholds;

/// Coarse risk bucket - ordered from safest to riskiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl PartialOrd for RiskCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RiskCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl RiskCategory {
    /// Bucket an overall score using the configured band boundaries
    pub fn from_overall(overall: u8, thresholds: &CategoryThresholds) -> Self {
        if overall >= thresholds.low_min {
            RiskCategory::Low
        } else if overall >= thresholds.medium_min {
            RiskCategory::Medium
        } else if overall >= thresholds.high_min {
            RiskCategory::High
        } else {
            RiskCategory::Critical
        }
    }
}

/// Composite risk score derived from one factor snapshot
///
/// One-to-one with the `RiskFactors` that produced it; recomputed whenever
/// any factor changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Composite safety estimate, 0-100 (higher = safer)
    pub overall: u8,
    pub category: RiskCategory,
    /// Scoring self-confidence, 0-100
    pub confidence: u8,
    pub computed_at: DateTime<Utc>,
}
