//! Activity monitor / drop-off detector
//!
//! Tracks last-activity per session and synthesizes `DropOffEvent`s when a
//! session breaches the inactivity threshold. A session is removed from the
//! active map at the moment of detection, which is the de-duplication
//! mechanism: a session instance can drop off at most once, and only a
//! fresh `register_session` starts a new instance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use onboard_core::SessionStore;

use crate::config::RecoveryConfig;
use crate::event::DropOffEvent;

/// Tracks session activity and detects drop-offs
pub struct ActivityMonitor {
    config: RecoveryConfig,
    store: Arc<dyn SessionStore>,
    /// user id -> last activity
    active: HashMap<String, DateTime<Utc>>,
}

impl ActivityMonitor {
    /// Create a monitor over the given session store
    pub fn new(config: RecoveryConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            config,
            store,
            active: HashMap::new(),
        }
    }

    /// Start tracking a session (or restart a dropped-off one)
    pub fn register_session(&mut self, user_id: &str, now: DateTime<Utc>) {
        self.active.insert(user_id.to_string(), now);
        tracing::debug!(user_id, "session registered");
    }

    /// Record activity for a session
    ///
    /// Touching an untracked session is a no-op: a dropped-off instance is
    /// terminal until re-registered.
    pub fn touch(&mut self, user_id: &str, now: DateTime<Utc>) {
        if let Some(last) = self.active.get_mut(user_id) {
            *last = now;
        }
    }

    /// Whether a session is currently tracked
    pub fn is_active(&self, user_id: &str) -> bool {
        self.active.contains_key(user_id)
    }

    /// Number of tracked sessions
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Cadence the owning loop should call `sweep` at
    pub fn sweep_interval(&self) -> Duration {
        Duration::seconds(self.config.sweep_interval_secs as i64)
    }

    /// Evaluate every tracked session against the inactivity threshold
    ///
    /// Sessions over the threshold are removed from the active map and an
    /// event is emitted for each, with session/progress snapshots pulled
    /// from the store. Each session is evaluated independently; removal on
    /// first detection guarantees no double-fire across sweeps.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> Vec<DropOffEvent> {
        let threshold = self.config.inactivity_threshold_secs as i64;

        let dropped: Vec<(String, u64)> = self
            .active
            .iter()
            .filter_map(|(user_id, last)| {
                let inactive = (now - *last).num_seconds();
                if inactive >= threshold {
                    Some((user_id.clone(), inactive as u64))
                } else {
                    None
                }
            })
            .collect();

        let mut events = Vec::with_capacity(dropped.len());
        for (user_id, inactive_secs) in dropped {
            self.active.remove(&user_id);

            let state = self.store.get(&user_id).unwrap_or_default();
            let event = DropOffEvent::detected(
                &user_id,
                inactive_secs,
                state.snapshot,
                state.progress,
                now,
            );

            tracing::info!(
                user_id,
                inactive_secs,
                reason = ?event.reason,
                step = %event.dropped_step,
                "drop-off detected"
            );
            events.push(event);
        }

        events
    }
}
