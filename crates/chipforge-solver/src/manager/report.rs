//! Values returned to the presentation layer.

use std::fmt;
use std::sync::Arc;

use chipforge_core::domain::{BoardRef, JobDescriptor, JobId, JobState, Strategy};
use thiserror::Error;

use crate::progress::Eta;
use crate::record::RecordError;
use crate::strategy::AbortReason;

/// How a job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The engine enumerated its whole search space.
    Completed,
    /// The job was stopped before the search finished.
    Stopped,
    /// The engine failed; the message is user-facing.
    Failed(String),
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Completed => f.write_str("completed"),
            JobOutcome::Stopped => f.write_str("stopped"),
            JobOutcome::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Result-count label for the current or last job.
///
/// Only a completed search is authoritative, so only a completed search
/// with no results reads as `NoneFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionLabel {
    /// No job, or the job is still running.
    Idle,
    Count(u64),
    NoneFound,
    /// Stopped early with this many results.
    Interrupted(u64),
    Failed(String),
}

impl CompletionLabel {
    pub(crate) fn for_outcome(outcome: &JobOutcome, count: u64) -> Self {
        match outcome {
            JobOutcome::Completed if count == 0 => CompletionLabel::NoneFound,
            JobOutcome::Completed => CompletionLabel::Count(count),
            JobOutcome::Stopped => CompletionLabel::Interrupted(count),
            JobOutcome::Failed(message) => CompletionLabel::Failed(message.clone()),
        }
    }
}

impl fmt::Display for CompletionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionLabel::Idle => Ok(()),
            CompletionLabel::Count(count) => write!(f, "{count}"),
            CompletionLabel::NoneFound => f.write_str("none found"),
            CompletionLabel::Interrupted(count) => write!(f, "{count} (interrupted)"),
            CompletionLabel::Failed(message) => write!(f, "search failed: {message}"),
        }
    }
}

/// Snapshot of job progress for one presentation poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub state: JobState,
    pub elapsed_ms: u64,
    /// Only present while running and once enough samples arrived.
    pub eta: Option<Eta>,
    pub enumerated: u64,
    pub total: u64,
    pub found: u64,
    /// Revision of the current result snapshot.
    pub revision: u64,
    /// True when the presentation should copy the results: they changed
    /// since last read, or a state change forces a refresh.
    pub refresh: bool,
    pub completion: CompletionLabel,
}

impl ProgressReport {
    pub fn warn(&self) -> bool {
        self.eta.is_some_and(|eta| eta.warn)
    }
}

/// Returned by a successful start.
#[derive(Debug, Clone)]
pub struct JobHandle {
    descriptor: Arc<JobDescriptor>,
}

impl JobHandle {
    pub(crate) fn new(descriptor: Arc<JobDescriptor>) -> Self {
        Self { descriptor }
    }

    pub fn id(&self) -> JobId {
        self.descriptor.id()
    }

    pub fn board(&self) -> &BoardRef {
        self.descriptor.board()
    }

    pub fn strategy(&self) -> &Strategy {
        self.descriptor.strategy()
    }

    pub fn descriptor(&self) -> &Arc<JobDescriptor> {
        &self.descriptor
    }
}

/// Why `start` did not create a job. None of these change controller
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("a job is already active")]
    AlreadyActive,

    #[error("chip {index} has an invalid point allocation")]
    InvalidInventory { index: usize },

    #[error("start aborted: {0}")]
    Aborted(AbortReason),

    #[error("search engine could not start: {0}")]
    Engine(String),
}

/// Why results could not be exported.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("results can only be exported once the job has stopped")]
    NotStopped,

    #[error("there are no results to export")]
    NoResults,

    #[error(transparent)]
    Record(#[from] RecordError),
}
