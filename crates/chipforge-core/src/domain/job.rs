//! Job descriptors and lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BoardRef, CandidateSet, SettingsSnapshot, Strategy};

/// Unique identifier of one job run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything the engine needs to run one job.
///
/// Fields are private and there are no setters: a descriptor is created
/// once per run and shared read-only with the worker.
#[derive(Debug, Clone)]
pub struct JobDescriptor {
    id: JobId,
    board: BoardRef,
    strategy: Strategy,
    candidates: CandidateSet,
    settings: SettingsSnapshot,
}

impl JobDescriptor {
    pub fn new(
        board: BoardRef,
        strategy: Strategy,
        candidates: CandidateSet,
        settings: SettingsSnapshot,
    ) -> Self {
        Self {
            id: JobId::new(),
            board,
            strategy,
            candidates,
            settings,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn board(&self) -> &BoardRef {
        &self.board
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn settings(&self) -> &SettingsSnapshot {
        &self.settings
    }
}

/// Lifecycle state of the job controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl JobState {
    /// Returns true while a job is attached (running or paused).
    pub fn is_active(self) -> bool {
        !matches!(self, JobState::Stopped)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Stopped => "stopped",
            JobState::Running => "running",
            JobState::Paused => "paused",
        };
        f.write_str(name)
    }
}
