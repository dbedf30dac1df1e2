//! Handoff summaries
//!
//! Presentation-layer text for the reviewing human: a narrative of how the
//! case reached them, a breakdown of where the AI confidence sits, and
//! suggested next steps. Nothing here feeds back into decision logic.

use serde::{Deserialize, Serialize};

use crate::escalation::{EscalationReason, StaffEscalation, Urgency};

/// AI confidence apportioned across assessment areas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub identity: f64,
    pub biometrics: f64,
    pub compliance: f64,
    pub behavioral: f64,
}

impl ConfidenceBreakdown {
    /// Split an overall confidence by the fixed area ratios
    pub fn from_overall(confidence: f64) -> Self {
        Self {
            identity: confidence * 0.30,
            biometrics: confidence * 0.25,
            compliance: confidence * 0.25,
            behavioral: confidence * 0.20,
        }
    }
}

/// A suggested next step for the reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub estimated_minutes: u32,
}

/// Human-readable handoff package for an escalated case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationSummary {
    pub escalation_id: String,
    pub headline: String,
    /// Narrative of how the case got here
    pub decision_path: String,
    pub confidence_breakdown: ConfidenceBreakdown,
    pub quick_actions: Vec<QuickAction>,
}

impl EscalationSummary {
    /// Build the summary for one escalation
    pub fn generate(escalation: &StaffEscalation) -> Self {
        let headline = format!(
            "{} escalation for user {} ({})",
            urgency_label(escalation.urgency),
            escalation.user_id,
            reason_label(escalation.reason),
        );

        let assessment = &escalation.assessment;
        let ctx = &escalation.user_context;
        let mut decision_path = format!(
            "The automated assessment reached {:.0}% confidence with a risk score of {:.0} \
             and leaned toward \"{}\". The user was on the {} step at {}% overall progress \
             after {} minutes ({} prior attempts, sentiment: {}).",
            assessment.confidence,
            assessment.risk_score,
            assessment.decision,
            ctx.current_step,
            ctx.progress_pct,
            ctx.time_spent_minutes,
            ctx.prior_attempts,
            ctx.sentiment,
        );
        if !assessment.key_factors.is_empty() {
            decision_path.push_str(&format!(
                " Key factors: {}.",
                assessment.key_factors.join(", ")
            ));
        }
        if !assessment.uncertainty_areas.is_empty() {
            decision_path.push_str(&format!(
                " The model was unsure about: {}.",
                assessment.uncertainty_areas.join(", ")
            ));
        }

        Self {
            escalation_id: escalation.id.clone(),
            headline,
            decision_path,
            confidence_breakdown: ConfidenceBreakdown::from_overall(assessment.confidence),
            quick_actions: quick_actions_for(escalation.reason),
        }
    }
}

fn urgency_label(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Low => "Low-urgency",
        Urgency::Medium => "Medium-urgency",
        Urgency::High => "High-urgency",
        Urgency::Critical => "Critical",
    }
}

fn reason_label(reason: EscalationReason) -> &'static str {
    match reason {
        EscalationReason::LowConfidence => "low AI confidence",
        EscalationReason::HighRisk => "high risk score",
        EscalationReason::UserRequest => "user requested a human",
        EscalationReason::SystemError => "system error",
        EscalationReason::ComplexCase => "complex case",
    }
}

fn quick_actions_for(reason: EscalationReason) -> Vec<QuickAction> {
    let actions: &[(&str, u32)] = match reason {
        EscalationReason::LowConfidence => &[
            ("Review submitted identity documents", 10),
            ("Re-run biometric comparison", 5),
            ("Request a clearer document photo", 3),
        ],
        EscalationReason::HighRisk => &[
            ("Review triggered risk rules", 10),
            ("Check AML and sanctions hits", 15),
            ("Open a fraud case", 5),
        ],
        EscalationReason::ComplexCase => &[
            ("Read the full session history", 15),
            ("Schedule a video interview", 5),
        ],
        EscalationReason::SystemError => &[
            ("Check provider status", 5),
            ("Retry the failed verification step", 3),
        ],
        EscalationReason::UserRequest => &[
            ("Contact the user", 10),
            ("Walk through the blocked step together", 15),
        ],
    };

    actions
        .iter()
        .map(|(label, minutes)| QuickAction {
            label: (*label).to_string(),
            estimated_minutes: *minutes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escalation::{AssessmentContext, EscalationRequest, UserContext};
    use chrono::Utc;

    fn escalation() -> StaffEscalation {
        StaffEscalation::from_request(
            EscalationRequest {
                user_id: "user-9".to_string(),
                case_id: "CASE-009".to_string(),
                reason: EscalationReason::HighRisk,
                urgency: Urgency::High,
                assessment: AssessmentContext {
                    confidence: 80.0,
                    risk_score: 74.0,
                    decision: "manual_review".to_string(),
                    key_factors: vec!["sanctions screening hit".to_string()],
                    uncertainty_areas: vec![],
                },
                user_context: UserContext {
                    current_step: "aml".to_string(),
                    progress_pct: 75,
                    time_spent_minutes: 9,
                    prior_attempts: 0,
                    sentiment: "patient".to_string(),
                },
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_breakdown_ratios_sum_to_overall() {
        let breakdown = ConfidenceBreakdown::from_overall(80.0);

        assert_eq!(breakdown.identity, 24.0);
        assert_eq!(breakdown.biometrics, 20.0);
        assert_eq!(breakdown.compliance, 20.0);
        assert_eq!(breakdown.behavioral, 16.0);
        let total = breakdown.identity
            + breakdown.biometrics
            + breakdown.compliance
            + breakdown.behavioral;
        assert!((total - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_mentions_context() {
        let summary = EscalationSummary::generate(&escalation());

        assert!(summary.headline.contains("user-9"));
        assert!(summary.decision_path.contains("sanctions screening hit"));
        assert!(summary.decision_path.contains("manual_review"));
        assert!(!summary.quick_actions.is_empty());
    }

    #[test]
    fn test_quick_actions_track_reason() {
        let labels: Vec<String> = quick_actions_for(EscalationReason::HighRisk)
            .into_iter()
            .map(|a| a.label)
            .collect();
        assert!(labels.iter().any(|l| l.contains("AML")));
    }
}
