//! Persisted job records.
//!
//! A record holds enough of a finished or interrupted job to show it again
//! after a restart: board, strategy, how the job ended, elapsed time and
//! the combinations found. Records are TOML files.

use std::fs;
use std::io;
use std::path::Path;

use chipforge_core::domain::{
    BoardCombination, BoardRef, JobId, SettingsSnapshot, StrategyKind,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::manager::JobOutcome;

/// Error reading or writing a job record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not serialize job record: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not parse job record: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("inconsistent job record: {0}")]
    Inconsistent(String),
}

/// Completion status stored in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Finished,
    Interrupted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub result_count: usize,
    pub elapsed_ms: u64,
    pub saved_at: DateTime<Utc>,
    pub board: BoardRef,
    pub strategy: StrategyKind,
    pub settings: SettingsSnapshot,
    #[serde(default)]
    pub results: Vec<BoardCombination>,
}

impl JobRecord {
    /// Builds a record stamped with the current UTC time.
    pub fn new(
        id: JobId,
        outcome: &JobOutcome,
        elapsed_ms: u64,
        board: BoardRef,
        strategy: StrategyKind,
        settings: SettingsSnapshot,
        results: Vec<BoardCombination>,
    ) -> Self {
        let (status, failure) = match outcome {
            JobOutcome::Completed => (JobStatus::Finished, None),
            JobOutcome::Stopped => (JobStatus::Interrupted, None),
            JobOutcome::Failed(message) => (JobStatus::Failed, Some(message.clone())),
        };
        Self {
            id,
            status,
            failure,
            result_count: results.len(),
            elapsed_ms,
            saved_at: Utc::now(),
            board,
            strategy,
            settings,
            results,
        }
    }

    pub fn outcome(&self) -> JobOutcome {
        match self.status {
            JobStatus::Finished => JobOutcome::Completed,
            JobStatus::Interrupted => JobOutcome::Stopped,
            JobStatus::Failed => JobOutcome::Failed(self.failure.clone().unwrap_or_default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, RecordError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RecordError> {
        let record: Self = toml::from_str(s)?;
        record.check()?;
        Ok(record)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?)?;
        debug!(path = %path.display(), job_id = %self.id, "saved job record");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn check(&self) -> Result<(), RecordError> {
        if self.result_count != self.results.len() {
            return Err(RecordError::Inconsistent(format!(
                "result_count is {} but {} results are stored",
                self.result_count,
                self.results.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
