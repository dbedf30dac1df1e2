//! Application context - wires everything together

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use onboard_core::{ManualClock, MemorySessionStore};
use onboard_escalation::{AssignmentRules, EscalationRouter};
use onboard_learning::{LearningConfig, LearningLedger, LearningService};
use onboard_recovery::{
    ActivityMonitor, MessageTransport, RecoveryAction, RecoveryConfig, RecoveryDispatcher,
    RecoveryError,
};
use onboard_risk::{FlowAdapter, RiskConfig, RiskEngine};

/// Transport that prints outbound messages instead of sending them
///
/// The CLI has no real channel backends; every send "succeeds" so the
/// full pending -> sent -> delivered pipeline can be demonstrated.
pub struct ConsoleTransport;

#[async_trait]
impl MessageTransport for ConsoleTransport {
    async fn send(&self, action: &RecoveryAction) -> Result<(), RecoveryError> {
        println!(
            "  [{}] {}{}",
            action.channel,
            if action.subject.is_empty() {
                String::new()
            } else {
                format!("{} | ", action.subject)
            },
            action.body
        );
        Ok(())
    }
}

/// Application context - the independent services behind one handle
pub struct AppContext {
    pub engine: RiskEngine,
    pub flow: FlowAdapter,
    pub monitor: ActivityMonitor,
    pub dispatcher: RecoveryDispatcher,
    pub learning: LearningService,
    pub router: EscalationRouter,
    pub clock: ManualClock,
    pub store: Arc<MemorySessionStore>,
    data_path: PathBuf,
}

impl AppContext {
    /// Create a context, loading any config files present under `data_path`
    ///
    /// Missing files fall back to defaults; the learning ledger is
    /// persisted at `<data_path>/learning.jsonl`.
    pub fn new(data_path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let data_path = data_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_path)?;

        let risk_config = load_or_default(&data_path.join("risk.json"), RiskConfig::from_file)?;
        let recovery_config =
            load_or_default(&data_path.join("recovery.json"), RecoveryConfig::from_file)?;
        let learning_config =
            load_or_default(&data_path.join("learning.json"), LearningConfig::from_file)?;
        let rules = load_or_default(&data_path.join("assignment.json"), AssignmentRules::from_file)?;

        let store = MemorySessionStore::shared();
        let ledger = LearningLedger::new(data_path.join("learning.jsonl"))?;

        Ok(Self {
            engine: RiskEngine::with_config(risk_config.clone()),
            flow: FlowAdapter::with_config(risk_config),
            monitor: ActivityMonitor::new(recovery_config.clone(), store.clone()),
            dispatcher: RecoveryDispatcher::new(recovery_config, Arc::new(ConsoleTransport)),
            learning: LearningService::new(learning_config, ledger),
            router: EscalationRouter::new(rules),
            clock: ManualClock::starting_now(),
            store,
            data_path,
        })
    }

    /// Data directory backing this context
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

fn load_or_default<T, F>(path: &Path, load: F) -> Result<T, std::io::Error>
where
    T: Default,
    F: Fn(&Path) -> Result<T, std::io::Error>,
{
    if path.exists() {
        load(path)
    } else {
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_core::Clock;

    #[test]
    fn test_context_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("onboard-data");

        let ctx = AppContext::new(&data).unwrap();

        assert!(data.exists());
        assert_eq!(ctx.data_path(), data);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("recovery.json"),
            r#"{ "inactivity_threshold_secs": 60 }"#,
        )
        .unwrap();

        let ctx = AppContext::new(dir.path()).unwrap();

        // Sessions idle for 60s already drop off
        let now = ctx.clock.now();
        let mut monitor = ctx.monitor;
        monitor.register_session("USER-001", now);
        let events = monitor.sweep(now + chrono::Duration::seconds(61));
        assert_eq!(events.len(), 1);
    }
}
