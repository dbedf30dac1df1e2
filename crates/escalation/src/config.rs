//! Assignment rules
//!
//! Governs how the router matches staff to escalations. Every toggle and
//! coefficient is overridable; the defaults are the product's tuned values.

use serde::{Deserialize, Serialize};

/// Configuration for staff auto-assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRules {
    /// Whether escalations are assigned automatically on creation
    #[serde(default = "default_auto_assign")]
    pub auto_assign: bool,

    /// A staff member at this load is not eligible for more cases
    #[serde(default = "default_max_cases_per_staff")]
    pub max_cases_per_staff: u32,

    /// Score points per unit of spare capacity
    #[serde(default = "default_load_balancing")]
    pub load_balancing: bool,

    /// Whether expertise tags contribute to the score
    #[serde(default = "default_expertise_matching")]
    pub expertise_matching: bool,

    /// Whether urgency contributes to the score
    #[serde(default = "default_urgency_priority")]
    pub urgency_priority: bool,

    /// Points per unit of spare capacity
    #[serde(default = "default_load_weight")]
    pub load_weight: f64,

    /// Points per urgency rank
    #[serde(default = "default_urgency_weight")]
    pub urgency_weight: f64,

    /// Points per matching expertise tag
    #[serde(default = "default_expertise_weight")]
    pub expertise_weight: f64,

    /// Multiplier on the satisfaction score
    #[serde(default = "default_satisfaction_weight")]
    pub satisfaction_weight: f64,

    /// Multiplier on resolution-speed headroom (minutes under 60)
    #[serde(default = "default_speed_weight")]
    pub speed_weight: f64,
}

fn default_auto_assign() -> bool {
    true
}

fn default_max_cases_per_staff() -> u32 {
    5
}

fn default_load_balancing() -> bool {
    true
}

fn default_expertise_matching() -> bool {
    true
}

fn default_urgency_priority() -> bool {
    true
}

fn default_load_weight() -> f64 {
    10.0
}

fn default_urgency_weight() -> f64 {
    5.0
}

fn default_expertise_weight() -> f64 {
    15.0
}

fn default_satisfaction_weight() -> f64 {
    0.2
}

fn default_speed_weight() -> f64 {
    0.5
}

impl Default for AssignmentRules {
    fn default() -> Self {
        Self {
            auto_assign: default_auto_assign(),
            max_cases_per_staff: default_max_cases_per_staff(),
            load_balancing: default_load_balancing(),
            expertise_matching: default_expertise_matching(),
            urgency_priority: default_urgency_priority(),
            load_weight: default_load_weight(),
            urgency_weight: default_urgency_weight(),
            expertise_weight: default_expertise_weight(),
            satisfaction_weight: default_satisfaction_weight(),
            speed_weight: default_speed_weight(),
        }
    }
}

impl AssignmentRules {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
