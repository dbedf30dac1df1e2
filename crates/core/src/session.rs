//! Session snapshots and the session store seam
//!
//! The drop-off detector and recovery dispatcher need a read-only view of
//! what the user was doing when they went quiet. `SessionStore` is the
//! pluggable boundary; `MemorySessionStore` is the reference
//! implementation used by tests and the demo orchestrator.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Device/browser/location context captured for a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Device description (e.g. "iPhone 15")
    pub device: String,
    /// Browser description (e.g. "Safari 17")
    pub browser: String,
    /// Coarse location (e.g. "Berlin, DE")
    pub location: String,
}

/// How far the user got before the session went quiet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    /// Step ids already completed
    pub completed_steps: Vec<String>,
    /// Step the user was on
    pub current_step: String,
    /// Percent complete of the current step (0-100)
    pub current_step_progress: u8,
    /// Form fields captured so far
    pub form_data: HashMap<String, String>,
    /// References to uploaded documents
    pub uploaded_files: Vec<String>,
}

/// Full per-user session state held by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub snapshot: SessionSnapshot,
    pub progress: ProgressData,
    /// When this state was last written
    pub updated_at: Option<DateTime<Utc>>,
}

/// Pluggable session storage
///
/// The in-memory implementation below is the only one shipped; a durable
/// backend slots in behind the same two calls.
pub trait SessionStore: Send + Sync {
    /// Fetch the state for a user, if any
    fn get(&self, user_id: &str) -> Option<SessionState>;

    /// Store the state for a user, replacing any prior state
    fn put(&self, user_id: &str, state: SessionState);
}

/// In-memory reference session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionState>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store behind an `Arc`, ready to share
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of stored sessions
    pub fn len(&self) -> usize {
        self.sessions.read().expect("session lock poisoned").len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, user_id: &str) -> Option<SessionState> {
        self.sessions
            .read()
            .expect("session lock poisoned")
            .get(user_id)
            .cloned()
    }

    fn put(&self, user_id: &str, state: SessionState) {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .insert(user_id.to_string(), state);
    }
}
