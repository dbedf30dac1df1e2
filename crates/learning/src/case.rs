//! Fraud cases and reviewer decisions
//!
//! A case carries the AI assessment that flagged it and, once a human has
//! looked at it, the reviewer decision. Case status is derived from the
//! decision, never set directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of suspected fraud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudType {
    IdentityFraud,
    SyntheticIdentity,
    AccountTakeover,
    MoneyLaundering,
    Other,
}

/// Case severity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Case lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Open,
    Investigating,
    Resolved,
    FalsePositive,
}

/// What the reviewer concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    ConfirmFraud,
    FalsePositive,
    NeedsInvestigation,
}

impl ReviewOutcome {
    /// The case status this outcome derives
    pub fn derived_status(self) -> CaseStatus {
        match self {
            ReviewOutcome::ConfirmFraud => CaseStatus::Resolved,
            ReviewOutcome::FalsePositive => CaseStatus::FalsePositive,
            ReviewOutcome::NeedsInvestigation => CaseStatus::Investigating,
        }
    }
}

/// The AI assessment that flagged the case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssessment {
    /// Risk score at flag time (0-100, here higher = riskier)
    pub risk_score: f64,
    /// Model confidence in the flag (0-100)
    pub confidence: f64,
    /// Rule ids that fired
    pub triggered_rules: Vec<String>,
    /// Biometric confidence at flag time (0-100)
    pub biometric_score: f64,
    /// Document authenticity score at flag time (0-100)
    pub document_score: f64,
    /// Behavioral anomalies observed
    pub behavioral_anomalies: Vec<String>,
}

/// A human reviewer's decision on a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerDecision {
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub outcome: ReviewOutcome,
    /// Reviewer confidence (0-100)
    pub confidence: f64,
    /// Free-text reasoning
    pub reasoning: String,
    pub decided_at: DateTime<Utc>,
}

/// One flagged session under review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCase {
    pub id: String,
    pub user_id: String,
    pub opened_at: DateTime<Utc>,
    pub fraud_type: FraudType,
    pub severity: CaseSeverity,
    pub status: CaseStatus,
    pub assessment: AiAssessment,
    pub review: Option<ReviewerDecision>,
}

impl FraudCase {
    /// Open a new case from an AI assessment
    pub fn open(
        user_id: impl Into<String>,
        fraud_type: FraudType,
        severity: CaseSeverity,
        assessment: AiAssessment,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            opened_at,
            fraud_type,
            severity,
            status: CaseStatus::Open,
            assessment,
            review: None,
        }
    }

    /// Attach a reviewer decision and derive the new status
    pub fn attach_review(&mut self, decision: ReviewerDecision) {
        self.status = decision.outcome.derived_status();
        self.review = Some(decision);
    }
}
