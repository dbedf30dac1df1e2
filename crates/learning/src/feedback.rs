//! Learning feedback derivation
//!
//! Compares a reviewer decision with the AI assessment that flagged the
//! case and derives weight, rule, and threshold adjustment suggestions.
//! The suggestions are advisory data for a model owner, not applied
//! automatically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::{FraudCase, ReviewOutcome};
use crate::config::LearningConfig;

/// A proposed feature weight adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSuggestion {
    pub feature: String,
    pub current_weight: f64,
    pub suggested_weight: f64,
    /// Estimated accuracy impact (absolute delta)
    pub accuracy_impact: f64,
}

/// Per-rule accuracy estimate and suggested action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInsight {
    pub rule_id: String,
    /// Coarse accuracy estimate, not a historical statistic
    pub accuracy_estimate: f64,
    pub suggestion: String,
}

/// A proposed nudge to the global risk threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRecommendation {
    pub threshold: String,
    pub suggested_delta: f64,
    pub rationale: String,
}

/// Deployment lifecycle of a suggested model update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Pending,
    Testing,
    Deployed,
    RolledBack,
}

/// Aggregated update proposal derived from one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUpdates {
    /// New version tag the changes would ship under
    pub version: String,
    /// Human-readable change descriptions
    pub changes: Vec<String>,
    /// Aggregate expected accuracy improvement, capped
    pub expected_accuracy_improvement: f64,
    pub deployment_status: DeploymentStatus,
}

/// Feedback generated from one reviewed case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningFeedback {
    pub id: String,
    pub case_id: String,
    pub generated_at: DateTime<Utc>,
    /// Whether the AI call disagreed with the human on a confident score
    pub misprediction: bool,
    pub weight_suggestions: Vec<WeightSuggestion>,
    pub rule_insights: Vec<RuleInsight>,
    pub threshold_recommendations: Vec<ThresholdRecommendation>,
    pub model_updates: ModelUpdates,
}

impl LearningFeedback {
    /// Derive feedback for a reviewed case
    ///
    /// Returns `None` when the review outcome is not terminal
    /// (`needs_investigation` defers learning until the case settles).
    pub fn derive(
        case: &FraudCase,
        config: &LearningConfig,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let review = case.review.as_ref()?;
        let confirmed = match review.outcome {
            ReviewOutcome::ConfirmFraud => true,
            ReviewOutcome::FalsePositive => false,
            ReviewOutcome::NeedsInvestigation => return None,
        };

        let risk = case.assessment.risk_score;
        let misprediction = (risk > config.high_score_bound && !confirmed)
            || (risk < config.low_score_bound && confirmed);

        let weight_suggestions = if misprediction {
            Self::weight_suggestions(case, config, confirmed)
        } else {
            Vec::new()
        };

        let rule_insights = Self::rule_insights(case, config, confirmed);
        let threshold_recommendations = Self::threshold_recommendations(case, config, confirmed);

        let mut changes: Vec<String> = Vec::new();
        for s in &weight_suggestions {
            changes.push(format!(
                "Adjust {} weight {:.1} -> {:.1}",
                s.feature, s.current_weight, s.suggested_weight
            ));
        }
        for r in &rule_insights {
            if r.accuracy_estimate < config.rule_accuracy_floor {
                changes.push(format!(
                    "Rule {}: {} (est. accuracy {:.0}%)",
                    r.rule_id, r.suggestion, r.accuracy_estimate
                ));
            }
        }
        for t in &threshold_recommendations {
            changes.push(format!(
                "Nudge {} by {:+.1}: {}",
                t.threshold, t.suggested_delta, t.rationale
            ));
        }

        let raw_improvement: f64 = weight_suggestions.iter().map(|s| s.accuracy_impact).sum();
        let expected_accuracy_improvement = raw_improvement.min(config.improvement_cap);

        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            case_id: case.id.clone(),
            generated_at: now,
            misprediction,
            weight_suggestions,
            rule_insights,
            threshold_recommendations,
            model_updates: ModelUpdates {
                version: format!("model-{}", now.format("%Y%m%d%H%M%S")),
                changes,
                expected_accuracy_improvement,
                deployment_status: DeploymentStatus::Pending,
            },
        })
    }

    fn weight_suggestions(
        case: &FraudCase,
        config: &LearningConfig,
        confirmed: bool,
    ) -> Vec<WeightSuggestion> {
        let anomaly_score =
            (case.assessment.behavioral_anomalies.len() as f64 * config.anomaly_weight).min(100.0);

        let features = [
            ("biometric_confidence", case.assessment.biometric_score),
            ("document_authenticity", case.assessment.document_score),
            ("behavioral_anomaly_score", anomaly_score),
        ];

        features
            .into_iter()
            .map(|(feature, current)| {
                let suggested = if confirmed {
                    (current * config.scale_up).min(100.0)
                } else {
                    (current * config.scale_down).max(0.0)
                };
                WeightSuggestion {
                    feature: feature.to_string(),
                    current_weight: current,
                    suggested_weight: suggested,
                    accuracy_impact: (suggested - current).abs(),
                }
            })
            .collect()
    }

    fn rule_insights(
        case: &FraudCase,
        config: &LearningConfig,
        confirmed: bool,
    ) -> Vec<RuleInsight> {
        let accuracy = if confirmed {
            config.rule_accuracy_confirmed
        } else {
            config.rule_accuracy_false_positive
        };
        let suggestion = if accuracy < config.rule_accuracy_floor {
            "increase threshold sensitivity"
        } else {
            "maintain"
        };

        case.assessment
            .triggered_rules
            .iter()
            .map(|rule_id| RuleInsight {
                rule_id: rule_id.clone(),
                accuracy_estimate: accuracy,
                suggestion: suggestion.to_string(),
            })
            .collect()
    }

    fn threshold_recommendations(
        case: &FraudCase,
        config: &LearningConfig,
        confirmed: bool,
    ) -> Vec<ThresholdRecommendation> {
        let risk = case.assessment.risk_score;
        if (risk - 50.0).abs() > config.borderline_band {
            return Vec::new();
        }

        // Borderline score: the human outcome tells us which way to lean
        let (delta, rationale) = if confirmed {
            (
                -config.threshold_nudge,
                "borderline score confirmed as fraud, catch more".to_string(),
            )
        } else {
            (
                config.threshold_nudge,
                "borderline score was a false positive, flag less".to_string(),
            )
        };

        vec![ThresholdRecommendation {
            threshold: "global_risk_threshold".to_string(),
            suggested_delta: delta,
            rationale,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{AiAssessment, CaseSeverity, FraudType, ReviewerDecision};

    fn reviewed_case(risk_score: f64, outcome: ReviewOutcome) -> FraudCase {
        let mut case = FraudCase::open(
            "USER-001",
            FraudType::IdentityFraud,
            CaseSeverity::High,
            AiAssessment {
                risk_score,
                confidence: 75.0,
                triggered_rules: vec!["VELOCITY".to_string(), "DOC_MISMATCH".to_string()],
                biometric_score: 60.0,
                document_score: 50.0,
                behavioral_anomalies: vec!["rapid_fill".to_string(), "vpn".to_string()],
            },
            Utc::now(),
        );
        case.attach_review(ReviewerDecision {
            reviewer_id: "REV-001".to_string(),
            reviewer_name: "Alex".to_string(),
            outcome,
            confidence: 90.0,
            reasoning: "verified".to_string(),
            decided_at: Utc::now(),
        });
        case
    }

    #[test]
    fn test_high_score_false_positive_is_misprediction() {
        let case = reviewed_case(80.0, ReviewOutcome::FalsePositive);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();

        assert!(feedback.misprediction);
        assert_eq!(feedback.weight_suggestions.len(), 3);
        // All suggestions move downward on a false positive
        for s in &feedback.weight_suggestions {
            assert!(s.suggested_weight <= s.current_weight, "{:?}", s);
            assert!(s.accuracy_impact > 0.0);
        }
    }

    #[test]
    fn test_low_score_confirmed_fraud_scales_weights_up() {
        let case = reviewed_case(20.0, ReviewOutcome::ConfirmFraud);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();

        assert!(feedback.misprediction);
        for s in &feedback.weight_suggestions {
            assert!(s.suggested_weight >= s.current_weight);
            assert!(s.suggested_weight <= 100.0);
        }
    }

    #[test]
    fn test_agreeing_prediction_skips_weight_suggestions() {
        let case = reviewed_case(80.0, ReviewOutcome::ConfirmFraud);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();

        assert!(!feedback.misprediction);
        assert!(feedback.weight_suggestions.is_empty());
        // Rule insights are still produced
        assert_eq!(feedback.rule_insights.len(), 2);
    }

    #[test]
    fn test_rule_accuracy_estimates() {
        let confirmed = reviewed_case(80.0, ReviewOutcome::ConfirmFraud);
        let feedback =
            LearningFeedback::derive(&confirmed, &LearningConfig::default(), Utc::now()).unwrap();
        assert!(feedback
            .rule_insights
            .iter()
            .all(|r| r.accuracy_estimate == 85.0 && r.suggestion == "maintain"));

        let rejected = reviewed_case(80.0, ReviewOutcome::FalsePositive);
        let feedback =
            LearningFeedback::derive(&rejected, &LearningConfig::default(), Utc::now()).unwrap();
        assert!(feedback
            .rule_insights
            .iter()
            .all(|r| r.accuracy_estimate == 45.0
                && r.suggestion == "increase threshold sensitivity"));
    }

    #[test]
    fn test_borderline_score_gets_threshold_nudge() {
        let case = reviewed_case(65.0, ReviewOutcome::FalsePositive);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();

        assert_eq!(feedback.threshold_recommendations.len(), 1);
        assert_eq!(feedback.threshold_recommendations[0].suggested_delta, 5.0);

        let case = reviewed_case(40.0, ReviewOutcome::ConfirmFraud);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();
        assert_eq!(feedback.threshold_recommendations[0].suggested_delta, -5.0);
    }

    #[test]
    fn test_clear_score_gets_no_threshold_nudge() {
        let case = reviewed_case(90.0, ReviewOutcome::ConfirmFraud);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();

        assert!(feedback.threshold_recommendations.is_empty());
    }

    #[test]
    fn test_improvement_capped() {
        let case = reviewed_case(20.0, ReviewOutcome::ConfirmFraud);
        let feedback =
            LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).unwrap();

        // Raw impacts sum past the cap (12 + 10 + 10 = 32)
        assert_eq!(feedback.model_updates.expected_accuracy_improvement, 15.0);
        assert_eq!(
            feedback.model_updates.deployment_status,
            DeploymentStatus::Pending
        );
        assert!(!feedback.model_updates.changes.is_empty());
    }

    #[test]
    fn test_needs_investigation_defers_feedback() {
        let case = reviewed_case(80.0, ReviewOutcome::NeedsInvestigation);
        assert!(LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).is_none());
    }

    #[test]
    fn test_unreviewed_case_yields_nothing() {
        let case = FraudCase::open(
            "USER-001",
            FraudType::Other,
            CaseSeverity::Low,
            AiAssessment {
                risk_score: 50.0,
                confidence: 50.0,
                triggered_rules: vec![],
                biometric_score: 50.0,
                document_score: 50.0,
                behavioral_anomalies: vec![],
            },
            Utc::now(),
        );
        assert!(LearningFeedback::derive(&case, &LearningConfig::default(), Utc::now()).is_none());
    }
}
