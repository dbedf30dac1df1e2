//! Staff members
//!
//! The router's view of the human team: availability, current load,
//! expertise tags, and the track-record numbers the scoring formula uses.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Staff role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StaffRole {
    ComplianceOfficer,
    FraudAnalyst,
    SupportAgent,
    TeamLead,
}

/// Availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Available,
    Busy,
    Offline,
}

/// One member of the human review team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub status: StaffStatus,
    /// Cases currently assigned
    pub current_load: u32,
    /// Expertise tags matched against escalation reasons
    pub expertise: Vec<String>,
    /// Average case resolution time in minutes
    pub avg_resolution_minutes: f64,
    /// Customer satisfaction score (0-100)
    pub satisfaction_score: f64,
}

impl StaffMember {
    /// Create an available staff member with no load
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: StaffRole,
        expertise: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            status: StaffStatus::Available,
            current_load: 0,
            expertise,
            avg_resolution_minutes: 30.0,
            satisfaction_score: 85.0,
        }
    }
}
