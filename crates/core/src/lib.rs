//! Onboard Core - shared domain types
//!
//! This crate contains the fundamental pieces used across the Onboard
//! workspace:
//! - `Clock`: injectable time source (system or manual, for tests)
//! - `Scheduler`: due-time priority queue replacing ad-hoc timer chains
//! - `SessionStore`: pluggable session snapshot storage
//! - `DocumentAnalysis`: result shape of the external document provider

pub mod clock;
pub mod document;
pub mod scheduler;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document::DocumentAnalysis;
pub use scheduler::Scheduler;
pub use session::{MemorySessionStore, ProgressData, SessionSnapshot, SessionState, SessionStore};
