//! Recovery actions
//!
//! One outbound message per (drop-off event, channel). Status moves only
//! forward: `pending -> sent -> delivered`, with `failed` reachable from
//! pending or sent once retries are exhausted.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Outbound message channel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecoveryChannel {
    Email,
    Whatsapp,
    InApp,
    Sms,
}

/// Send pipeline status (monotonic forward transitions only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

impl ActionStatus {
    /// Whether moving to `next` is a legal forward transition
    pub fn can_transition_to(self, next: ActionStatus) -> bool {
        use ActionStatus::*;
        matches!(
            (self, next),
            (Pending, Sent) | (Sent, Delivered) | (Pending, Failed) | (Sent, Failed)
        )
    }

    /// Whether this status is terminal
    pub fn is_terminal(self) -> bool {
        matches!(self, ActionStatus::Delivered | ActionStatus::Failed)
    }
}

/// Send priority derived from how far the user got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl PartialOrd for ActionPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ActionPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl ActionPriority {
    /// Priority from current-step progress percent
    pub fn from_progress(percent: u8) -> Self {
        if percent > 80 {
            ActionPriority::Urgent
        } else if percent > 50 {
            ActionPriority::High
        } else if percent > 20 {
            ActionPriority::Medium
        } else {
            ActionPriority::Low
        }
    }
}

/// One outbound recovery message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAction {
    pub id: String,
    /// The drop-off event that triggered this action
    pub event_id: String,
    pub channel: RecoveryChannel,
    pub status: ActionStatus,
    pub scheduled_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    /// Rendered subject (empty for channels without one)
    pub subject: String,
    /// Rendered body
    pub body: String,
    pub retry_count: u32,
    pub max_retries: u32,
    pub priority: ActionPriority,
}

impl RecoveryAction {
    /// Create a pending action scheduled for the given time
    pub fn pending(
        event_id: impl Into<String>,
        channel: RecoveryChannel,
        subject: impl Into<String>,
        body: impl Into<String>,
        priority: ActionPriority,
        scheduled_at: DateTime<Utc>,
        max_retries: u32,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.into(),
            channel,
            status: ActionStatus::Pending,
            scheduled_at,
            sent_at: None,
            subject: subject.into(),
            body: body.into(),
            retry_count: 0,
            max_retries,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(ActionPriority::from_progress(85), ActionPriority::Urgent);
        assert_eq!(ActionPriority::from_progress(60), ActionPriority::High);
        assert_eq!(ActionPriority::from_progress(30), ActionPriority::Medium);
        assert_eq!(ActionPriority::from_progress(10), ActionPriority::Low);
    }

    #[test]
    fn test_priority_boundary_values() {
        assert_eq!(ActionPriority::from_progress(81), ActionPriority::Urgent);
        assert_eq!(ActionPriority::from_progress(80), ActionPriority::High);
        assert_eq!(ActionPriority::from_progress(51), ActionPriority::High);
        assert_eq!(ActionPriority::from_progress(50), ActionPriority::Medium);
        assert_eq!(ActionPriority::from_progress(21), ActionPriority::Medium);
        assert_eq!(ActionPriority::from_progress(20), ActionPriority::Low);
        assert_eq!(ActionPriority::from_progress(0), ActionPriority::Low);
    }

    #[test]
    fn test_status_transitions_are_forward_only() {
        use ActionStatus::*;

        assert!(Pending.can_transition_to(Sent));
        assert!(Sent.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Failed));
        assert!(Sent.can_transition_to(Failed));

        assert!(!Sent.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Sent));
        assert!(!Delivered.can_transition_to(Pending));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ActionStatus::Pending.is_terminal());
        assert!(!ActionStatus::Sent.is_terminal());
        assert!(ActionStatus::Delivered.is_terminal());
        assert!(ActionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(RecoveryChannel::Email.to_string(), "email");
        assert_eq!(RecoveryChannel::InApp.to_string(), "in_app");
        assert_eq!(RecoveryChannel::Whatsapp.to_string(), "whatsapp");
    }

    #[test]
    fn test_pending_action_defaults() {
        let action = RecoveryAction::pending(
            "EVT-1",
            RecoveryChannel::Email,
            "Come back",
            "Hi {first_name}",
            ActionPriority::High,
            Utc::now(),
            3,
        );

        assert_eq!(action.status, ActionStatus::Pending);
        assert_eq!(action.retry_count, 0);
        assert!(action.sent_at.is_none());
    }
}
