//! Learning service - main orchestrator
//!
//! Owns the case map, feedback store, metrics history, and ledger. All
//! mutation flows through `&mut self`, which keeps the running tally and
//! case state serialized.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::case::{AiAssessment, CaseSeverity, FraudCase, FraudType, ReviewOutcome, ReviewerDecision};
use crate::config::LearningConfig;
use crate::error::{LearningError, LearningResult};
use crate::feedback::{DeploymentStatus, LearningFeedback};
use crate::ledger::{LearningEvent, LearningLedger};
use crate::metrics::{MetricsHistory, ModelMetrics};

/// Fraud-case learning loop
pub struct LearningService {
    config: LearningConfig,
    ledger: LearningLedger,
    cases: HashMap<String, FraudCase>,
    feedback: HashMap<String, LearningFeedback>,
    metrics: MetricsHistory,
    current_version: String,
    last_model_update: Option<DateTime<Utc>>,
}

impl LearningService {
    /// Create a service with the given configuration and ledger
    pub fn new(config: LearningConfig, ledger: LearningLedger) -> Self {
        Self {
            config,
            ledger,
            cases: HashMap::new(),
            feedback: HashMap::new(),
            metrics: MetricsHistory::new(),
            current_version: "baseline".to_string(),
            last_model_update: None,
        }
    }

    /// Create a service with an in-memory ledger (for testing)
    pub fn in_memory() -> Self {
        Self::new(LearningConfig::default(), LearningLedger::in_memory())
    }

    /// Open a new fraud case and return its id
    pub fn open_case(
        &mut self,
        user_id: impl Into<String>,
        fraud_type: FraudType,
        severity: CaseSeverity,
        assessment: AiAssessment,
        now: DateTime<Utc>,
    ) -> LearningResult<String> {
        let case = FraudCase::open(user_id, fraud_type, severity, assessment, now);
        let case_id = case.id.clone();

        self.ledger.append(&LearningEvent::case_opened(
            &case_id,
            &case.user_id,
            case.assessment.risk_score,
            now,
        ))?;

        tracing::info!(case_id = %case_id, risk_score = case.assessment.risk_score, "fraud case opened");
        self.cases.insert(case_id.clone(), case);
        Ok(case_id)
    }

    /// Attach a reviewer decision, derive the case status, update metrics,
    /// and - when the loop is enabled - generate feedback
    ///
    /// Returns the id of the generated feedback, if any. An unknown case id
    /// is logged and surfaces as an error without touching any state.
    pub fn submit_review(
        &mut self,
        case_id: &str,
        decision: ReviewerDecision,
        now: DateTime<Utc>,
    ) -> LearningResult<Option<String>> {
        let Some(case) = self.cases.get_mut(case_id) else {
            tracing::warn!(case_id, "review submitted for unknown case, ignoring");
            return Err(LearningError::CaseNotFound(case_id.to_string()));
        };
        if case.review.is_some() {
            return Err(LearningError::CaseAlreadyReviewed(case_id.to_string()));
        }

        let outcome = decision.outcome;
        let reviewer_id = decision.reviewer_id.clone();
        case.attach_review(decision);

        self.ledger.append(&LearningEvent::review_recorded(
            case_id,
            reviewer_id,
            outcome,
            now,
        ))?;

        // Metrics only advance on settled outcomes
        if outcome != ReviewOutcome::NeedsInvestigation {
            let risk = self.cases[case_id].assessment.risk_score;
            let correct = (risk > self.config.high_score_bound
                && outcome == ReviewOutcome::ConfirmFraud)
                || (risk < self.config.low_score_bound
                    && outcome == ReviewOutcome::FalsePositive);
            let version = self.current_version.clone();
            self.metrics.record(correct, &version, now);
        }

        if !self.config.enabled {
            return Ok(None);
        }

        match self.generate_feedback(case_id, now) {
            Ok(feedback_id) => Ok(feedback_id),
            Err(err) => {
                // Feedback failure never corrupts the case or metrics
                tracing::warn!(case_id, error = %err, "feedback generation failed");
                Ok(None)
            }
        }
    }

    /// Derive feedback for a reviewed case
    ///
    /// Returns `Ok(None)` when the outcome defers learning
    /// (`needs_investigation`).
    pub fn generate_feedback(
        &mut self,
        case_id: &str,
        now: DateTime<Utc>,
    ) -> LearningResult<Option<String>> {
        let case = self
            .cases
            .get(case_id)
            .ok_or_else(|| LearningError::CaseNotFound(case_id.to_string()))?;
        if case.review.is_none() {
            return Err(LearningError::CaseNotReviewed(case_id.to_string()));
        }

        let Some(feedback) = LearningFeedback::derive(case, &self.config, now) else {
            return Ok(None);
        };

        self.ledger.append(&LearningEvent::FeedbackGenerated {
            id: uuid::Uuid::new_v4().to_string(),
            case_id: case_id.to_string(),
            feedback_id: feedback.id.clone(),
            misprediction: feedback.misprediction,
            expected_improvement: feedback.model_updates.expected_accuracy_improvement,
            timestamp: now,
        })?;

        tracing::info!(
            case_id,
            feedback_id = %feedback.id,
            misprediction = feedback.misprediction,
            "learning feedback generated"
        );

        let feedback_id = feedback.id.clone();
        self.feedback.insert(feedback_id.clone(), feedback);
        Ok(Some(feedback_id))
    }

    /// Mark a suggested update as deployed and stamp the model version
    pub fn deploy_update(&mut self, feedback_id: &str, now: DateTime<Utc>) -> LearningResult<()> {
        let feedback = self
            .feedback
            .get_mut(feedback_id)
            .ok_or_else(|| LearningError::FeedbackNotFound(feedback_id.to_string()))?;

        feedback.model_updates.deployment_status = DeploymentStatus::Deployed;
        self.current_version = feedback.model_updates.version.clone();
        self.last_model_update = Some(now);

        self.ledger.append(&LearningEvent::UpdateDeployed {
            id: uuid::Uuid::new_v4().to_string(),
            feedback_id: feedback_id.to_string(),
            version: self.current_version.clone(),
            timestamp: now,
        })?;

        tracing::info!(feedback_id, version = %self.current_version, "model update deployed");
        Ok(())
    }

    /// Look up a case by id
    pub fn case(&self, case_id: &str) -> Option<&FraudCase> {
        self.cases.get(case_id)
    }

    /// Look up generated feedback by id
    pub fn feedback(&self, feedback_id: &str) -> Option<&LearningFeedback> {
        self.feedback.get(feedback_id)
    }

    /// Latest metrics snapshot
    pub fn latest_metrics(&self) -> Option<&ModelMetrics> {
        self.metrics.latest()
    }

    /// Full metrics history
    pub fn metrics_history(&self) -> &[ModelMetrics] {
        self.metrics.entries()
    }

    /// When the model was last updated, if ever
    pub fn last_model_update(&self) -> Option<DateTime<Utc>> {
        self.last_model_update
    }

    /// Current model version tag
    pub fn current_version(&self) -> &str {
        &self.current_version
    }
}
