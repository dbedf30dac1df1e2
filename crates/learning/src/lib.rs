//! Onboard Learning - fraud review feedback loop
//!
//! Consumes human reviewer decisions on flagged cases, compares them with
//! the original AI assessment, derives weight/rule/threshold adjustment
//! suggestions, and maintains a rolling model-performance history.
//!
//! ```text
//! FraudCase ──► submit_review(decision)
//!                    │ status derived from decision
//!                    ├──► generate_feedback  (weights, rules, thresholds)
//!                    └──► ModelMetrics appended (append-only history)
//! ```
//!
//! Every state change is also appended to the JSONL learning ledger, so the
//! whole loop can be replayed.

pub mod case;
pub mod config;
pub mod error;
pub mod feedback;
pub mod ledger;
pub mod metrics;
pub mod service;

pub use case::{
    AiAssessment, CaseSeverity, CaseStatus, FraudCase, FraudType, ReviewOutcome, ReviewerDecision,
};
pub use config::LearningConfig;
pub use error::{LearningError, LearningResult};
pub use feedback::{
    DeploymentStatus, LearningFeedback, ModelUpdates, RuleInsight, ThresholdRecommendation,
    WeightSuggestion,
};
pub use ledger::{LearningEvent, LearningLedger};
pub use metrics::{ImprovementTrend, ModelMetrics};
pub use service::LearningService;
