//! Recovery dispatcher
//!
//! Turns drop-off events into channel-specific recovery actions and drives
//! them through the send pipeline. All timing goes through the shared
//! `Scheduler`; callers drive it with `run_due(now)` from whatever loop
//! owns the clock.
//!
//! Send failures never propagate to the caller that detected the drop-off:
//! they are recorded on the action and retried with backoff until the
//! retry budget is spent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use onboard_core::Scheduler;

use crate::action::{ActionPriority, ActionStatus, RecoveryAction};
use crate::config::RecoveryConfig;
use crate::error::RecoveryError;
use crate::event::DropOffEvent;
use crate::template;

/// Outbound message transport seam
///
/// One implementation per real channel backend; tests plug in a mock.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Attempt to send one action. Errors trigger the retry pipeline.
    async fn send(&self, action: &RecoveryAction) -> Result<(), RecoveryError>;
}

/// Work items flowing through the dispatch scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
enum DispatchTask {
    /// Attempt (or re-attempt) a send
    Send { action_id: String },
    /// Simulated delivery confirmation after a successful send
    ConfirmDelivery { action_id: String },
}

/// Builds and drives recovery actions for drop-off events
pub struct RecoveryDispatcher {
    config: RecoveryConfig,
    transport: Arc<dyn MessageTransport>,
    actions: HashMap<String, RecoveryAction>,
    scheduler: Scheduler<DispatchTask>,
}

impl RecoveryDispatcher {
    /// Create a dispatcher over the given transport
    pub fn new(config: RecoveryConfig, transport: Arc<dyn MessageTransport>) -> Self {
        Self {
            config,
            transport,
            actions: HashMap::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Build one action per enabled channel and schedule the first sends
    ///
    /// Sends are scheduled a short delay out so that rapid successive
    /// triggers batch without coupling to the sweep that detected them.
    pub fn handle_drop_off(&mut self, event: &DropOffEvent, now: DateTime<Utc>) {
        let personalization = self.personalization(event);
        let priority = ActionPriority::from_progress(event.progress.current_step_progress);
        let send_at = now + Duration::seconds(self.config.send_delay_secs as i64);

        for channel in self.config.enabled_channels.clone() {
            let Some(tpl) = self.config.templates.get(&channel) else {
                tracing::warn!(%channel, "no template configured, skipping channel");
                continue;
            };

            let action = RecoveryAction::pending(
                &event.id,
                channel,
                template::render(&tpl.subject, &personalization),
                template::render(&tpl.body, &personalization),
                priority,
                send_at,
                self.config.max_retries,
            );

            tracing::info!(
                action_id = %action.id,
                event_id = %event.id,
                %channel,
                ?priority,
                "recovery action scheduled"
            );

            self.scheduler.schedule(
                send_at,
                DispatchTask::Send {
                    action_id: action.id.clone(),
                },
            );
            self.actions.insert(action.id.clone(), action);
        }
    }

    /// Process every task due at or before `now`
    ///
    /// Returns the number of tasks processed. Failures are recorded on the
    /// actions, never returned.
    pub async fn run_due(&mut self, now: DateTime<Utc>) -> usize {
        let due = self.scheduler.pop_due(now);
        let count = due.len();

        for task in due {
            match task {
                DispatchTask::Send { action_id } => self.attempt_send(&action_id, now).await,
                DispatchTask::ConfirmDelivery { action_id } => self.confirm_delivery(&action_id),
            }
        }

        count
    }

    async fn attempt_send(&mut self, action_id: &str, now: DateTime<Utc>) {
        let Some(action) = self.actions.get(action_id) else {
            tracing::warn!(action_id, "send task for unknown action");
            return;
        };
        if action.status.is_terminal() {
            return;
        }

        let result = self.transport.send(action).await;
        let action = self
            .actions
            .get_mut(action_id)
            .expect("action checked above");

        match result {
            Ok(()) => {
                action.status = ActionStatus::Sent;
                action.sent_at = Some(now);
                tracing::info!(action_id, channel = %action.channel, "recovery message sent");

                let confirm_at = now + Duration::seconds(self.config.delivery_confirm_secs as i64);
                self.scheduler.schedule(
                    confirm_at,
                    DispatchTask::ConfirmDelivery {
                        action_id: action_id.to_string(),
                    },
                );
            }
            Err(err) => {
                let delay = self.config.retry_delay_secs(action.retry_count);
                action.retry_count += 1;

                if action.retry_count < action.max_retries {
                    tracing::warn!(
                        action_id,
                        retry = action.retry_count,
                        delay_secs = delay,
                        error = %err,
                        "send failed, retry scheduled"
                    );
                    self.scheduler.schedule(
                        now + Duration::seconds(delay as i64),
                        DispatchTask::Send {
                            action_id: action_id.to_string(),
                        },
                    );
                } else {
                    action.status = ActionStatus::Failed;
                    tracing::warn!(
                        action_id,
                        attempts = action.retry_count,
                        error = %err,
                        "send failed, retries exhausted"
                    );
                }
            }
        }
    }

    fn confirm_delivery(&mut self, action_id: &str) {
        if let Some(action) = self.actions.get_mut(action_id) {
            if action.status == ActionStatus::Sent {
                action.status = ActionStatus::Delivered;
                tracing::debug!(action_id, "delivery confirmed");
            }
        }
    }

    /// Personalization values available to every template
    fn personalization(&self, event: &DropOffEvent) -> HashMap<String, String> {
        let first_name = event
            .progress
            .form_data
            .get("first_name")
            .cloned()
            .unwrap_or_else(|| "there".to_string());
        let resume_link = format!(
            "https://onboard.example/resume/{}",
            template::resume_token(&event.user_id, &event.id, event.timestamp.timestamp_millis())
        );

        HashMap::from([
            ("first_name".to_string(), first_name),
            ("resume_link".to_string(), resume_link),
            ("step".to_string(), event.dropped_step.clone()),
            (
                "progress".to_string(),
                event.progress.current_step_progress.to_string(),
            ),
            (
                "minutes_spent".to_string(),
                event.minutes_spent().to_string(),
            ),
            (
                "reason".to_string(),
                serde_json::to_string(&event.reason)
                    .unwrap_or_default()
                    .trim_matches('"')
                    .to_string(),
            ),
        ])
    }

    /// Look up an action by id
    pub fn action(&self, action_id: &str) -> Option<&RecoveryAction> {
        self.actions.get(action_id)
    }

    /// All actions for a drop-off event
    pub fn actions_for_event(&self, event_id: &str) -> Vec<&RecoveryAction> {
        self.actions
            .values()
            .filter(|a| a.event_id == event_id)
            .collect()
    }

    /// Number of tasks still waiting in the scheduler
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Earliest pending due time, if any
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_due()
    }
}
