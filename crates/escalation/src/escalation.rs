//! Escalation records
//!
//! One record per case handed off to a human. Assignment is filled by the
//! router; resolution closes the record and is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why the case was escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    LowConfidence,
    HighRisk,
    UserRequest,
    SystemError,
    ComplexCase,
}

impl EscalationReason {
    /// Expertise tags relevant to this reason
    pub fn relevant_expertise(self) -> &'static [&'static str] {
        match self {
            EscalationReason::LowConfidence => &["identity_verification", "biometric_analysis"],
            EscalationReason::HighRisk => {
                &["fraud_detection", "aml_compliance", "risk_assessment"]
            }
            EscalationReason::ComplexCase => &["complex_cases", "problem_resolution"],
            EscalationReason::SystemError => &["technical_support", "system_troubleshooting"],
            EscalationReason::UserRequest => &["general_support"],
        }
    }
}

/// How urgently a human is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Urgency {
    /// Numeric rank used by the assignment score
    pub fn rank(self) -> u32 {
        self as u32
    }
}

/// The AI assessment that triggered the escalation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentContext {
    /// Model confidence (0-100)
    pub confidence: f64,
    /// Risk score at escalation time (0-100)
    pub risk_score: f64,
    /// The decision the model leaned toward
    pub decision: String,
    /// Factors that drove the assessment
    pub key_factors: Vec<String>,
    /// Where the model was unsure
    pub uncertainty_areas: Vec<String>,
}

/// What the user was doing when the escalation fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub current_step: String,
    /// Overall progress percent (0-100)
    pub progress_pct: u8,
    pub time_spent_minutes: u32,
    pub prior_attempts: u32,
    /// Coarse sentiment tag ("patient", "frustrated", ...)
    pub sentiment: String,
}

/// Assignment record filled by the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub assigned_to: String,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by: String,
    pub estimated_resolution_minutes: f64,
}

/// How a resolved escalation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionAction {
    Approve,
    Reject,
    RequestMoreInfo,
    EscalateFurther,
}

/// Resolution record (terminal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub resolved_by: String,
    pub resolved_at: DateTime<Utc>,
    pub action: ResolutionAction,
    pub reasoning: String,
    pub follow_up_required: bool,
}

/// Input to `EscalationRouter::escalate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationRequest {
    pub user_id: String,
    pub case_id: String,
    pub reason: EscalationReason,
    pub urgency: Urgency,
    pub assessment: AssessmentContext,
    pub user_context: UserContext,
}

/// One case routed to a human
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffEscalation {
    pub id: String,
    pub user_id: String,
    pub case_id: String,
    pub created_at: DateTime<Utc>,
    pub reason: EscalationReason,
    pub urgency: Urgency,
    pub assessment: AssessmentContext,
    pub user_context: UserContext,
    pub assignment: Option<Assignment>,
    pub resolution: Option<Resolution>,
}

impl StaffEscalation {
    /// Create an unassigned escalation from a request
    pub fn from_request(request: EscalationRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: request.user_id,
            case_id: request.case_id,
            created_at: now,
            reason: request.reason,
            urgency: request.urgency,
            assessment: request.assessment,
            user_context: request.user_context,
            assignment: None,
            resolution: None,
        }
    }

    /// Whether the escalation has been closed
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_ranks() {
        assert_eq!(Urgency::Low.rank(), 1);
        assert_eq!(Urgency::Medium.rank(), 2);
        assert_eq!(Urgency::High.rank(), 3);
        assert_eq!(Urgency::Critical.rank(), 4);
    }

    #[test]
    fn test_relevant_expertise_per_reason() {
        assert_eq!(
            EscalationReason::HighRisk.relevant_expertise(),
            &["fraud_detection", "aml_compliance", "risk_assessment"]
        );
        assert_eq!(
            EscalationReason::UserRequest.relevant_expertise(),
            &["general_support"]
        );
    }

    #[test]
    fn test_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&EscalationReason::LowConfidence).unwrap(),
            "\"low_confidence\""
        );
        assert_eq!(
            serde_json::to_string(&ResolutionAction::RequestMoreInfo).unwrap(),
            "\"request_more_info\""
        );
    }
}
