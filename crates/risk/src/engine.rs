//! Risk engine implementation
//!
//! Computes four sub-scores (identity, biometrics, behavioral, compliance),
//! combines them with configured weights, and buckets the result. Scoring is
//! total: defaults stand in for anything the caller did not provide, so no
//! input ever produces an error.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::config::RiskConfig;
use crate::factors::{DocumentType, RiskFactors};
use crate::score::{RiskCategory, RiskScore};

/// Risk Engine - composite scoring over factor snapshots
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::with_config(RiskConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Score a factor snapshot
    pub fn calculate(&self, factors: &RiskFactors) -> RiskScore {
        self.calculate_at(factors, Utc::now())
    }

    /// Score a factor snapshot with an explicit timestamp
    pub fn calculate_at(&self, factors: &RiskFactors, now: DateTime<Utc>) -> RiskScore {
        let identity = self.identity_score(factors);
        let biometrics = self.biometric_score(factors);
        let behavioral = self.behavioral_score(factors);
        let compliance = self.compliance_score(factors);

        let weights = &self.config.weights;
        let weighted = identity * weights.identity
            + biometrics * weights.biometrics
            + behavioral * weights.behavioral
            + compliance * weights.compliance;
        let overall = weighted.round().clamp(0.0, 100.0) as u8;

        let category = RiskCategory::from_overall(overall, &self.config.thresholds);
        let confidence = self.confidence(overall, factors);

        tracing::debug!(
            overall,
            ?category,
            identity,
            biometrics,
            behavioral,
            compliance,
            "risk score computed"
        );

        RiskScore {
            overall,
            category,
            confidence,
            computed_at: now,
        }
    }

    /// Identity sub-score: document type, quality, OCR confidence, expiry
    fn identity_score(&self, factors: &RiskFactors) -> f64 {
        let identity = &factors.identity;
        let mut score: f64 = 100.0;

        score += match identity.document_type {
            DocumentType::Passport => self.config.passport_bonus,
            DocumentType::IdCard => 0.0,
            DocumentType::DriversLicense => -self.config.drivers_license_penalty,
        };

        score -= (100.0 - identity.document_quality.clamp(0.0, 100.0)) * 0.3;
        score -= (100.0 - identity.ocr_confidence.clamp(0.0, 100.0)) * 0.2;

        let (urgent, soon, eventual) = self.config.expiry_penalties;
        if identity.days_until_expiry < 30 {
            score -= urgent;
        } else if identity.days_until_expiry < 90 {
            score -= soon;
        } else if identity.days_until_expiry < 365 {
            score -= eventual;
        }

        score.clamp(0.0, 100.0)
    }

    /// Biometric sub-score: weighted average of the three checks
    fn biometric_score(&self, factors: &RiskFactors) -> f64 {
        let biometrics = &factors.biometrics;
        let score = biometrics.liveness_score.clamp(0.0, 100.0) * 0.4
            + biometrics.face_match_confidence.clamp(0.0, 100.0) * 0.35
            + biometrics.anti_spoof_score.clamp(0.0, 100.0) * 0.25;
        score.clamp(0.0, 100.0)
    }

    /// Behavioral sub-score: completion pace and location consistency
    fn behavioral_score(&self, factors: &RiskFactors) -> f64 {
        let behavioral = &factors.behavioral;
        let mut score: f64 = 100.0;

        if behavioral.completion_time_secs < self.config.min_completion_secs {
            // Suspiciously fast - possible automation
            score -= self.config.too_fast_penalty;
        } else if behavioral.completion_time_secs > self.config.max_completion_secs {
            score -= self.config.too_slow_penalty;
        }

        if !behavioral.location_consistent {
            score -= self.config.location_penalty;
        }

        score.clamp(0.0, 100.0)
    }

    /// Compliance sub-score: AML base minus screening-hit penalties
    fn compliance_score(&self, factors: &RiskFactors) -> f64 {
        let compliance = &factors.compliance;
        let mut score = compliance.aml_score.clamp(0.0, 100.0);

        if compliance.pep_match {
            score -= self.config.pep_penalty;
        }
        if compliance.sanctions_match {
            score -= self.config.sanctions_penalty;
        }
        if compliance.adverse_media {
            score -= self.config.adverse_media_penalty;
        }

        score.clamp(0.0, 100.0)
    }

    /// Confidence: overall jittered by a deterministic +-jitter, clamped
    ///
    /// The jitter is a function of the factors themselves (sha256 of the
    /// canonical JSON encoding), so the same snapshot always yields the
    /// same confidence.
    fn confidence(&self, overall: u8, factors: &RiskFactors) -> u8 {
        let jitter_span = self.config.confidence_jitter as i64;
        let (min, max) = self.config.confidence_bounds;

        let encoded = serde_json::to_vec(factors).unwrap_or_default();
        let digest = Sha256::digest(&encoded);
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let seed = u64::from_be_bytes(prefix);

        // Map the hash into [-jitter, +jitter]
        let jitter = (seed % (2 * jitter_span as u64 + 1)) as i64 - jitter_span;
        let confidence = (overall as i64 + jitter).clamp(min as i64, max as i64);
        confidence as u8
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::{
        BehavioralFactors, BiometricFactors, ComplianceFactors, IdentityFactors,
    };

    fn clean_factors() -> RiskFactors {
        RiskFactors {
            identity: IdentityFactors {
                document_type: DocumentType::Passport,
                document_quality: 95.0,
                ocr_confidence: 98.0,
                days_until_expiry: 400,
            },
            biometrics: BiometricFactors {
                liveness_score: 97.0,
                face_match_confidence: 96.0,
                anti_spoof_score: 95.0,
            },
            behavioral: BehavioralFactors {
                completion_time_secs: 200,
                location_consistent: true,
                ..Default::default()
            },
            compliance: ComplianceFactors {
                aml_score: 98.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_overall_always_in_range() {
        let engine = RiskEngine::new();

        let worst = RiskFactors {
            identity: IdentityFactors {
                document_type: DocumentType::DriversLicense,
                document_quality: 0.0,
                ocr_confidence: 0.0,
                days_until_expiry: 0,
            },
            biometrics: BiometricFactors {
                liveness_score: 0.0,
                face_match_confidence: 0.0,
                anti_spoof_score: 0.0,
            },
            behavioral: BehavioralFactors {
                completion_time_secs: 10,
                location_consistent: false,
                ..Default::default()
            },
            compliance: ComplianceFactors {
                aml_score: 0.0,
                pep_match: true,
                sanctions_match: true,
                adverse_media: true,
            },
        };

        let best = clean_factors();

        for factors in [worst, best, RiskFactors::default()] {
            let score = engine.calculate(&factors);
            assert!(score.overall <= 100);
            assert!(score.confidence >= 60 && score.confidence <= 95);
        }
    }

    #[test]
    fn test_low_risk_fast_track_scenario() {
        let engine = RiskEngine::new();
        let score = engine.calculate(&clean_factors());

        assert!(score.overall >= 85, "overall was {}", score.overall);
        assert_eq!(score.category, RiskCategory::Low);
    }

    #[test]
    fn test_sanctions_hit_drags_score_down() {
        let engine = RiskEngine::new();

        let mut factors = RiskFactors::default();
        factors.compliance.sanctions_match = true;

        // Compliance sub-score drops to 95 - 50 = 45; with weight 0.25 the
        // overall falls out of the low band even though every other factor
        // is at its default.
        let score = engine.calculate(&factors);
        assert!(score.category >= RiskCategory::Medium, "got {:?}", score.category);
        assert!(score.overall < 85, "overall was {}", score.overall);

        let baseline = engine.calculate(&RiskFactors::default());
        assert!(score.overall < baseline.overall);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let engine = RiskEngine::new();
        let factors = clean_factors();

        let first = engine.calculate(&factors);
        let second = engine.calculate(&factors);

        assert_eq!(first.overall, second.overall);
        assert_eq!(first.category, second.category);
        // Jitter is deterministic over the same snapshot
        assert_eq!(first.confidence, second.confidence);
    }

    #[test]
    fn test_missing_factors_use_defaults() {
        let engine = RiskEngine::new();

        // Totally empty input is still scorable
        let score = engine.calculate(&RiskFactors::default());
        assert!(score.overall > 0);
    }

    #[test]
    fn test_too_fast_completion_penalized() {
        let engine = RiskEngine::new();

        let mut slow = clean_factors();
        slow.behavioral.completion_time_secs = 300;
        let mut fast = clean_factors();
        fast.behavioral.completion_time_secs = 60;

        assert!(engine.calculate(&fast).overall < engine.calculate(&slow).overall);
    }

    #[test]
    fn test_near_expiry_document_penalized() {
        let engine = RiskEngine::new();

        let mut fresh = clean_factors();
        fresh.identity.days_until_expiry = 400;
        let mut expiring = clean_factors();
        expiring.identity.days_until_expiry = 14;

        assert!(engine.calculate(&expiring).overall < engine.calculate(&fresh).overall);
    }

    #[test]
    fn test_location_mismatch_penalized() {
        let engine = RiskEngine::new();

        let mut inconsistent = clean_factors();
        inconsistent.behavioral.location_consistent = false;

        let consistent_score = engine.calculate(&clean_factors());
        let inconsistent_score = engine.calculate(&inconsistent);

        assert!(inconsistent_score.overall < consistent_score.overall);
    }
}
