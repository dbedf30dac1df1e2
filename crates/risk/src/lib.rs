//! Onboard Risk Engine
//!
//! Turns raw onboarding signals into a composite risk score and adapts the
//! onboarding step sequence to it.
//!
//! ## Pipeline
//!
//! ```text
//! RiskFactors ──► RiskEngine::calculate ──► RiskScore
//!                                              │
//!                        ┌─────────────────────┘
//!                        ▼
//!                 FlowAdapter::adapt ──► AdaptedFlow (steps, skips, savings)
//! ```
//!
//! Scoring is total: missing factors fall back to documented defaults and
//! never produce an error. Confidence jitter is deterministic (hash of the
//! factors), so identical input always scores identically.

pub mod config;
pub mod engine;
pub mod factors;
pub mod flow;
pub mod score;

pub use config::RiskConfig;
pub use engine::RiskEngine;
pub use factors::{
    BehavioralFactors, BiometricFactors, ComplianceFactors, DocumentType, IdentityFactors,
    RiskFactors,
};
pub use flow::{AdaptedFlow, FlowAdapter, FlowStep};
pub use score::{RiskCategory, RiskScore};
