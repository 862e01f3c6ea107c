//! Event hooks for job monitoring.
//!
//! Listeners registered on the [`JobController`](crate::manager::JobController)
//! hear about every lifecycle transition and every job completion. They
//! are called synchronously, in registration order, on the thread that
//! drove the controller.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use chipforge_core::domain::{JobId, JobState};
//! use chipforge_solver::event::{CountingEventListener, JobEventSupport};
//!
//! let counter = Arc::new(CountingEventListener::new());
//! let mut support = JobEventSupport::new();
//! support.add_listener(counter.clone());
//!
//! support.fire_state_changed(JobId::new(), JobState::Stopped, JobState::Running);
//! assert_eq!(counter.transition_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chipforge_core::domain::{JobId, JobState};
use tracing::info;

use crate::manager::JobOutcome;

/// Listener for job lifecycle events.
pub trait JobEventListener: Send + Sync + Debug {
    /// Called after every state transition.
    fn on_state_changed(&self, _job: JobId, _from: JobState, _to: JobState) {}

    /// Called once per job when it reaches `Stopped`.
    fn on_job_finished(&self, _job: JobId, _outcome: &JobOutcome, _result_count: usize) {}
}

/// Broadcasts job events to registered listeners.
#[derive(Default)]
pub struct JobEventSupport {
    listeners: Vec<Arc<dyn JobEventListener>>,
}

impl JobEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn JobEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_state_changed(&self, job: JobId, from: JobState, to: JobState) {
        for listener in &self.listeners {
            listener.on_state_changed(job, from, to);
        }
    }

    pub fn fire_job_finished(&self, job: JobId, outcome: &JobOutcome, result_count: usize) {
        for listener in &self.listeners {
            listener.on_job_finished(job, outcome, result_count);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for JobEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl JobEventListener for LoggingEventListener {
    fn on_state_changed(&self, job: JobId, from: JobState, to: JobState) {
        info!(
            event = "job_transition",
            job_id = %job,
            from = %from,
            to = %to,
            "{}job {} -> {}",
            self.prefix,
            from,
            to
        );
    }

    fn on_job_finished(&self, job: JobId, outcome: &JobOutcome, result_count: usize) {
        info!(
            event = "job_finished",
            job_id = %job,
            outcome = %outcome,
            results = result_count,
            "{}job finished",
            self.prefix
        );
    }
}

/// Counts events; handy in tests.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    transitions: AtomicUsize,
    finished: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }

    pub fn finished_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.transitions.store(0, Ordering::SeqCst);
        self.finished.store(0, Ordering::SeqCst);
    }
}

impl JobEventListener for CountingEventListener {
    fn on_state_changed(&self, _job: JobId, _from: JobState, _to: JobState) {
        self.transitions.fetch_add(1, Ordering::SeqCst);
    }

    fn on_job_finished(&self, _job: JobId, _outcome: &JobOutcome, _result_count: usize) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
