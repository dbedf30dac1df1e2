//! Flow adaptation
//!
//! Shapes the onboarding step sequence from the risk category. This is a
//! UX-shaping heuristic, not a statistical model: the score only needs to
//! be directionally correct for the adaptation to do its job.

use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::factors::RiskFactors;
use crate::score::{RiskCategory, RiskScore};

/// One step of the onboarding sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    pub id: String,
    pub name: String,
    /// Whether the step can be skipped by adaptation
    pub required: bool,
    /// Fraction of the total risk-relevant weight (sums to 1.0 over the
    /// base set; appended steps carry 0.0)
    pub weight: f64,
    /// Estimated duration in seconds
    pub estimated_secs: u32,
}

impl FlowStep {
    fn new(id: &str, name: &str, required: bool, weight: f64, estimated_secs: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            required,
            weight,
            estimated_secs,
        }
    }
}

/// The fixed base onboarding sequence
pub fn base_steps() -> Vec<FlowStep> {
    vec![
        FlowStep::new("identity", "Identity Verification", true, 0.30, 180),
        FlowStep::new("biometrics", "Biometric Check", true, 0.25, 120),
        FlowStep::new("details", "Personal Details", true, 0.20, 240),
        FlowStep::new("aml", "AML Screening", true, 0.15, 60),
        FlowStep::new("additional_docs", "Additional Documents", false, 0.10, 300),
    ]
}

/// Result of adapting the base sequence to a risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptedFlow {
    /// The derived ordered step list
    pub steps: Vec<FlowStep>,
    /// Step ids removed from the base sequence
    pub skipped: Vec<String>,
    /// Step ids appended beyond the base sequence
    pub added: Vec<String>,
    /// Percent of base time saved; negative when steps were added
    pub time_reduction_pct: i64,
}

/// Adapts the base step sequence to a risk score
///
/// Remembers the last adaptation so `should_skip` can answer as a pure
/// lookup.
pub struct FlowAdapter {
    config: RiskConfig,
    last_skipped: Vec<String>,
}

impl FlowAdapter {
    /// Create an adapter with default configuration
    pub fn new() -> Self {
        Self::with_config(RiskConfig::default())
    }

    /// Create an adapter with explicit configuration
    pub fn with_config(config: RiskConfig) -> Self {
        Self {
            config,
            last_skipped: Vec::new(),
        }
    }

    /// Derive the adapted step list for a score
    pub fn adapt(&mut self, score: &RiskScore, factors: &RiskFactors) -> AdaptedFlow {
        let base = base_steps();
        let base_total: u32 = base.iter().map(|s| s.estimated_secs).sum();

        let mut steps = base;
        let mut skipped = Vec::new();
        let mut added = Vec::new();

        match score.category {
            RiskCategory::Low => {
                // Fast track: non-required steps come out
                steps.retain(|step| {
                    if !step.required {
                        skipped.push(step.id.clone());
                        false
                    } else {
                        true
                    }
                });
            }
            RiskCategory::Medium => {
                if factors.identity.document_quality < self.config.enhanced_doc_quality_threshold {
                    push_extra(&mut steps, &mut added, extra_identity_enhanced());
                }
            }
            RiskCategory::High => {
                push_extra(&mut steps, &mut added, extra_identity_enhanced());
                push_extra(&mut steps, &mut added, extra_video_interview());
            }
            RiskCategory::Critical => {
                push_extra(&mut steps, &mut added, extra_identity_enhanced());
                push_extra(&mut steps, &mut added, extra_video_interview());
                push_extra(&mut steps, &mut added, extra_manual_review());
            }
        }

        let adapted_total: u32 = steps.iter().map(|s| s.estimated_secs).sum();
        let time_reduction_pct = (((base_total as f64 - adapted_total as f64)
            / base_total as f64)
            * 100.0)
            .round() as i64;

        tracing::debug!(
            category = ?score.category,
            skipped = skipped.len(),
            added = added.len(),
            time_reduction_pct,
            "flow adapted"
        );

        self.last_skipped = skipped.clone();

        AdaptedFlow {
            steps,
            skipped,
            added,
            time_reduction_pct,
        }
    }

    /// Whether the last adaptation skipped the given step
    pub fn should_skip(&self, step_id: &str) -> bool {
        self.last_skipped.iter().any(|id| id == step_id)
    }
}

impl Default for FlowAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_extra(steps: &mut Vec<FlowStep>, added: &mut Vec<String>, step: FlowStep) {
    added.push(step.id.clone());
    steps.push(step);
}

/// Marker step: signals the caller to insert extra verification UI
fn extra_identity_enhanced() -> FlowStep {
    FlowStep::new("identity_enhanced", "Enhanced Identity Check", false, 0.0, 240)
}

fn extra_video_interview() -> FlowStep {
    FlowStep::new("video_interview", "Video Interview", true, 0.0, 600)
}

fn extra_manual_review() -> FlowStep {
    FlowStep::new("manual_review", "Manual Review", true, 0.0, 900)
}
