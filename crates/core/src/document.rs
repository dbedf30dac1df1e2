//! Document analysis provider result shape
//!
//! The external OCR/vision provider is an opaque collaborator; this is the
//! only shape the engine consumes from it. Quality and confidence numbers
//! extracted here feed the identity risk factors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Result returned by the external document analysis provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Whether the provider accepted the document
    pub is_valid: bool,
    /// Provider-reported document type (free-form)
    pub document_type: String,
    /// Reason the document was rejected, empty when valid
    #[serde(default)]
    pub rejection_reason: String,
    /// Extracted fields (name, number, expiry, ...)
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl DocumentAnalysis {
    /// Provider-reported quality score, if present (0-100)
    pub fn quality(&self) -> Option<u8> {
        self.field_score("quality")
    }

    /// Provider-reported OCR confidence, if present (0-100)
    pub fn ocr_confidence(&self) -> Option<u8> {
        self.field_score("ocr_confidence")
    }

    fn field_score(&self, key: &str) -> Option<u8> {
        self.fields
            .get(key)
            .and_then(|v| v.parse::<u8>().ok())
            .map(|v| v.min(100))
    }
}
