//! Risk factor snapshot
//!
//! One immutable snapshot of the four signal groups for a session. A new
//! snapshot supersedes the prior one; the engine never mutates factors.
//!
//! Every field carries a documented default so partial provider input is
//! always scorable (`#[serde(default)]` end to end).

use serde::{Deserialize, Serialize};

/// Accepted identity document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    IdCard,
    DriversLicense,
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::IdCard
    }
}

/// Identity document signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityFactors {
    pub document_type: DocumentType,
    /// Provider-reported document quality (0-100)
    pub document_quality: f64,
    /// Provider-reported OCR confidence (0-100)
    pub ocr_confidence: f64,
    /// Days until the document expires
    pub days_until_expiry: i64,
}

impl Default for IdentityFactors {
    fn default() -> Self {
        Self {
            document_type: DocumentType::default(),
            document_quality: 85.0,
            ocr_confidence: 90.0,
            days_until_expiry: 400,
        }
    }
}

/// Biometric verification signals (all 0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiometricFactors {
    pub liveness_score: f64,
    pub face_match_confidence: f64,
    pub anti_spoof_score: f64,
}

impl Default for BiometricFactors {
    fn default() -> Self {
        Self {
            liveness_score: 95.0,
            face_match_confidence: 92.0,
            anti_spoof_score: 93.0,
        }
    }
}

/// Behavioral session signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralFactors {
    /// Total completion time in seconds
    pub completion_time_secs: u64,
    pub device_fingerprint: String,
    pub ip_address: String,
    /// Whether declared and observed locations agree
    pub location_consistent: bool,
}

impl Default for BehavioralFactors {
    fn default() -> Self {
        Self {
            completion_time_secs: 300,
            device_fingerprint: String::new(),
            ip_address: String::new(),
            location_consistent: true,
        }
    }
}

/// Compliance screening signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceFactors {
    /// AML screening score (0-100, higher = cleaner)
    pub aml_score: f64,
    pub pep_match: bool,
    pub sanctions_match: bool,
    pub adverse_media: bool,
}

impl Default for ComplianceFactors {
    fn default() -> Self {
        Self {
            aml_score: 95.0,
            pep_match: false,
            sanctions_match: false,
            adverse_media: false,
        }
    }
}

/// Full factor snapshot for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFactors {
    pub identity: IdentityFactors,
    pub biometrics: BiometricFactors,
    pub behavioral: BehavioralFactors,
    pub compliance: ComplianceFactors,
}
