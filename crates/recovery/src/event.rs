//! Drop-off events
//!
//! Created once per detected drop-off and never mutated afterwards. The
//! abandonment reason is a heuristic over the inactivity span.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use onboard_core::{ProgressData, SessionSnapshot};

/// Inactivity beyond this span is read as a deliberate exit (seconds)
const USER_EXIT_THRESHOLD_SECS: u64 = 3600;

/// Why a session is believed to have been abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonReason {
    Timeout,
    Error,
    UserExit,
    NetworkIssue,
}

impl AbandonReason {
    /// Heuristic: over an hour of silence reads as a deliberate exit,
    /// anything shorter as a timeout
    pub fn from_inactivity(inactive_secs: u64) -> Self {
        if inactive_secs > USER_EXIT_THRESHOLD_SECS {
            AbandonReason::UserExit
        } else {
            AbandonReason::Timeout
        }
    }
}

/// One detected drop-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropOffEvent {
    pub id: String,
    pub user_id: String,
    /// Step the user was on when they went quiet
    pub dropped_step: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds of inactivity at detection time
    pub inactive_secs: u64,
    pub reason: AbandonReason,
    /// Device/browser/location at drop-off
    pub session: SessionSnapshot,
    /// Completed steps, current-step percent, form data, uploads
    pub progress: ProgressData,
}

impl DropOffEvent {
    /// Build an event for a session that breached the inactivity threshold
    pub fn detected(
        user_id: impl Into<String>,
        inactive_secs: u64,
        session: SessionSnapshot,
        progress: ProgressData,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            dropped_step: progress.current_step.clone(),
            timestamp,
            inactive_secs,
            reason: AbandonReason::from_inactivity(inactive_secs),
            session,
            progress,
        }
    }

    /// Minutes the user had spent before dropping off, estimated from the
    /// completed-step count
    pub fn minutes_spent(&self) -> u64 {
        // Rough estimate used only for message personalization
        (self.progress.completed_steps.len() as u64 * 3).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_heuristic() {
        assert_eq!(AbandonReason::from_inactivity(301), AbandonReason::Timeout);
        assert_eq!(AbandonReason::from_inactivity(3600), AbandonReason::Timeout);
        assert_eq!(AbandonReason::from_inactivity(3601), AbandonReason::UserExit);
    }

    #[test]
    fn test_detected_event() {
        let mut progress = ProgressData::default();
        progress.current_step = "biometrics".to_string();
        progress.completed_steps = vec!["identity".to_string(), "details".to_string()];

        let event = DropOffEvent::detected(
            "USER-001",
            450,
            SessionSnapshot::default(),
            progress,
            Utc::now(),
        );

        assert_eq!(event.user_id, "USER-001");
        assert_eq!(event.dropped_step, "biometrics");
        assert_eq!(event.reason, AbandonReason::Timeout);
        assert_eq!(event.minutes_spent(), 6);
        assert!(!event.id.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = DropOffEvent::detected(
            "USER-002",
            4000,
            SessionSnapshot::default(),
            ProgressData::default(),
            Utc::now(),
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("user_exit"));

        let parsed: DropOffEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
