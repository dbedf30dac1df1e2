//! Onboard Recovery - drop-off detection and recovery dispatch
//!
//! ## Pipeline
//!
//! ```text
//! touch()/register_session()
//!        │
//!        ▼
//! ActivityMonitor::sweep(now) ──► DropOffEvent
//!                                     │
//!                                     ▼
//!                   RecoveryDispatcher::handle_drop_off
//!                                     │ (scheduled +5s)
//!                                     ▼
//!                   run_due(now) ──► MessageTransport::send
//!                        │   pending ──► sent ──► delivered
//!                        └── failure ──► backoff retry ──► failed
//! ```
//!
//! Send failures are data, not errors: they surface as action status and
//! never propagate back to the sweep that triggered them.

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod monitor;
pub mod template;

pub use action::{ActionPriority, ActionStatus, RecoveryAction, RecoveryChannel};
pub use config::{ChannelTemplate, RecoveryConfig};
pub use dispatcher::{MessageTransport, RecoveryDispatcher};
pub use error::{RecoveryError, RecoveryResult};
pub use event::{AbandonReason, DropOffEvent};
pub use monitor::ActivityMonitor;
