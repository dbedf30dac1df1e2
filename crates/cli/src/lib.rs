//! Onboard CLI - command orchestrator
//!
//! This crate provides the `onboard` binary and wires the independent
//! services (risk, recovery, learning, escalation) into one context.

pub mod commands;
pub mod context;

pub use context::AppContext;
