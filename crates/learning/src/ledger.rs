//! Learning ledger - append-only JSONL storage
//!
//! Every state change in the learning loop is appended here, so the whole
//! loop (cases, reviews, feedback, deployments) can be replayed. Each line
//! is one JSON-serialized `LearningEvent`; the file is never rewritten.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::ReviewOutcome;
use crate::error::LearningResult;

/// Events appended to the learning ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LearningEvent {
    /// A fraud case was opened
    CaseOpened {
        id: String,
        case_id: String,
        user_id: String,
        risk_score: f64,
        timestamp: DateTime<Utc>,
    },

    /// A reviewer decision was recorded
    ReviewRecorded {
        id: String,
        case_id: String,
        reviewer_id: String,
        outcome: ReviewOutcome,
        timestamp: DateTime<Utc>,
    },

    /// Feedback was derived from a reviewed case
    FeedbackGenerated {
        id: String,
        case_id: String,
        feedback_id: String,
        misprediction: bool,
        expected_improvement: f64,
        timestamp: DateTime<Utc>,
    },

    /// A suggested model update was deployed
    UpdateDeployed {
        id: String,
        feedback_id: String,
        version: String,
        timestamp: DateTime<Utc>,
    },
}

impl LearningEvent {
    /// Get the event ID
    pub fn id(&self) -> &str {
        match self {
            LearningEvent::CaseOpened { id, .. } => id,
            LearningEvent::ReviewRecorded { id, .. } => id,
            LearningEvent::FeedbackGenerated { id, .. } => id,
            LearningEvent::UpdateDeployed { id, .. } => id,
        }
    }

    /// Get the timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LearningEvent::CaseOpened { timestamp, .. } => *timestamp,
            LearningEvent::ReviewRecorded { timestamp, .. } => *timestamp,
            LearningEvent::FeedbackGenerated { timestamp, .. } => *timestamp,
            LearningEvent::UpdateDeployed { timestamp, .. } => *timestamp,
        }
    }

    /// Create a new CaseOpened event
    pub fn case_opened(
        case_id: impl Into<String>,
        user_id: impl Into<String>,
        risk_score: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        LearningEvent::CaseOpened {
            id: uuid::Uuid::new_v4().to_string(),
            case_id: case_id.into(),
            user_id: user_id.into(),
            risk_score,
            timestamp,
        }
    }

    /// Create a new ReviewRecorded event
    pub fn review_recorded(
        case_id: impl Into<String>,
        reviewer_id: impl Into<String>,
        outcome: ReviewOutcome,
        timestamp: DateTime<Utc>,
    ) -> Self {
        LearningEvent::ReviewRecorded {
            id: uuid::Uuid::new_v4().to_string(),
            case_id: case_id.into(),
            reviewer_id: reviewer_id.into(),
            outcome,
            timestamp,
        }
    }
}

/// Append-only JSONL ledger for learning events
pub struct LearningLedger {
    path: PathBuf,
    file: Option<File>,
}

impl LearningLedger {
    /// Create a new ledger at the given path
    pub fn new(path: impl AsRef<Path>) -> LearningResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    /// Create an in-memory ledger (for testing)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            file: None,
        }
    }

    /// Append an event to the ledger
    pub fn append(&mut self, event: &LearningEvent) -> LearningResult<()> {
        if let Some(ref mut file) = self.file {
            let json = serde_json::to_string(event)?;
            writeln!(file, "{}", json)?;
            file.flush()?;
            Ok(())
        } else {
            // In-memory mode - just validate serialization
            let _ = serde_json::to_string(event)?;
            Ok(())
        }
    }

    /// Read all events from the ledger
    pub fn read_all(&self) -> LearningResult<Vec<LearningEvent>> {
        if self.file.is_none() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: LearningEvent = serde_json::from_str(&line)?;
            events.push(event);
        }

        Ok(events)
    }

    /// Get the path to the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if this is an in-memory ledger
    pub fn is_in_memory(&self) -> bool {
        self.file.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_in_memory_ledger() {
        let mut ledger = LearningLedger::in_memory();

        let event = LearningEvent::case_opened("CASE-1", "USER-001", 80.0, Utc::now());
        ledger.append(&event).unwrap();

        assert!(ledger.is_in_memory());
        assert_eq!(ledger.read_all().unwrap().len(), 0); // In-memory doesn't store
    }

    #[test]
    fn test_file_ledger_write_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("learning.jsonl");

        let event1 = LearningEvent::case_opened("CASE-1", "USER-001", 80.0, Utc::now());
        let event2 = LearningEvent::review_recorded(
            "CASE-1",
            "REV-001",
            ReviewOutcome::FalsePositive,
            Utc::now(),
        );

        {
            let mut ledger = LearningLedger::new(&path).unwrap();
            ledger.append(&event1).unwrap();
            ledger.append(&event2).unwrap();
        }

        {
            let ledger = LearningLedger::new(&path).unwrap();
            let events = ledger.read_all().unwrap();

            assert_eq!(events.len(), 2);
            assert_eq!(events[0].id(), event1.id());
            assert_eq!(events[1].id(), event2.id());
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = LearningEvent::review_recorded(
            "CASE-9",
            "REV-002",
            ReviewOutcome::ConfirmFraud,
            Utc::now(),
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("review_recorded"));
        assert!(json.contains("confirm_fraud"));

        let parsed: LearningEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id(), event.id());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("learning.jsonl");

        let ledger = LearningLedger::new(&path).unwrap();
        assert!(!ledger.is_in_memory());
        assert!(path.parent().unwrap().exists());
    }
}
