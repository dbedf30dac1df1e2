//! Recovery configuration
//!
//! Inactivity thresholds, channel selection, retry policy, and per-channel
//! templates - all overridable via file, none hardcoded in the pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::action::RecoveryChannel;

/// Subject/body template pair for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTemplate {
    #[serde(default)]
    pub subject: String,
    pub body: String,
}

/// Configuration for drop-off detection and recovery dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Seconds of silence before a session counts as dropped off
    #[serde(default = "default_inactivity_threshold_secs")]
    pub inactivity_threshold_secs: u64,

    /// How often the sweep runs (seconds)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Channels to build actions for, in order
    #[serde(default = "default_enabled_channels")]
    pub enabled_channels: Vec<RecoveryChannel>,

    /// Delay between drop-off detection and first send attempt (seconds)
    #[serde(default = "default_send_delay_secs")]
    pub send_delay_secs: u64,

    /// Simulated delivery-confirmation lag after a send (seconds)
    #[serde(default = "default_delivery_confirm_secs")]
    pub delivery_confirm_secs: u64,

    /// Maximum send attempts before an action is failed
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base retry intervals per attempt (seconds)
    #[serde(default = "default_retry_intervals_secs")]
    pub retry_intervals_secs: Vec<u64>,

    /// Multiplier applied to each base interval
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u64,

    /// Per-channel message templates
    #[serde(default = "default_templates")]
    pub templates: HashMap<RecoveryChannel, ChannelTemplate>,
}

fn default_inactivity_threshold_secs() -> u64 {
    300
}

fn default_sweep_interval_secs() -> u64 {
    30
}

fn default_enabled_channels() -> Vec<RecoveryChannel> {
    vec![RecoveryChannel::Email, RecoveryChannel::InApp]
}

fn default_send_delay_secs() -> u64 {
    5
}

fn default_delivery_confirm_secs() -> u64 {
    2
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_intervals_secs() -> Vec<u64> {
    vec![300, 900, 3600]
}

fn default_backoff_multiplier() -> u64 {
    2
}

fn default_templates() -> HashMap<RecoveryChannel, ChannelTemplate> {
    HashMap::from([
        (
            RecoveryChannel::Email,
            ChannelTemplate {
                subject: "{first_name}, your application is almost done".to_string(),
                body: "Hi {first_name}, you were {progress}% through the {step} step \
                       after {minutes_spent} minutes. Pick up where you left off: {resume_link}"
                    .to_string(),
            },
        ),
        (
            RecoveryChannel::InApp,
            ChannelTemplate {
                subject: String::new(),
                body: "Welcome back {first_name}! Your {step} step is {progress}% done. \
                       Tap to continue."
                    .to_string(),
            },
        ),
        (
            RecoveryChannel::Sms,
            ChannelTemplate {
                subject: String::new(),
                body: "{first_name}, finish your application in a few minutes: {resume_link}"
                    .to_string(),
            },
        ),
        (
            RecoveryChannel::Whatsapp,
            ChannelTemplate {
                subject: String::new(),
                body: "Hi {first_name}, your {step} step is waiting ({progress}% done). \
                       Resume here: {resume_link}"
                    .to_string(),
            },
        ),
    ])
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold_secs: default_inactivity_threshold_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            enabled_channels: default_enabled_channels(),
            send_delay_secs: default_send_delay_secs(),
            delivery_confirm_secs: default_delivery_confirm_secs(),
            max_retries: default_max_retries(),
            retry_intervals_secs: default_retry_intervals_secs(),
            backoff_multiplier: default_backoff_multiplier(),
            templates: default_templates(),
        }
    }
}

impl RecoveryConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Backoff delay for a given retry attempt (seconds)
    ///
    /// Attempts past the configured interval table reuse the last entry.
    pub fn retry_delay_secs(&self, retry_count: u32) -> u64 {
        let idx = (retry_count as usize).min(self.retry_intervals_secs.len().saturating_sub(1));
        self.retry_intervals_secs
            .get(idx)
            .copied()
            .unwrap_or(default_retry_intervals_secs()[0])
            * self.backoff_multiplier
    }
}
