//! Cooperative pause and stop signal shared with the worker.

use std::ops::ControlFlow;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use chipforge_core::domain::JobState;

/// The run state the worker checks at its safe points.
///
/// Starts `Running`. `Stopped` is terminal: once stopped the gate never
/// opens again, and [`RunGate::while_live`] refuses to run anything.
#[derive(Debug)]
pub struct RunGate {
    state: Mutex<JobState>,
    changed: Condvar,
}

impl RunGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(JobState::Running),
            changed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, JobState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> JobState {
        *self.lock()
    }

    /// `Running -> Paused`. Returns false from any other state.
    pub fn pause(&self) -> bool {
        let mut state = self.lock();
        if *state != JobState::Running {
            return false;
        }
        *state = JobState::Paused;
        true
    }

    /// `Paused -> Running`, waking the worker.
    pub fn resume(&self) -> bool {
        let mut state = self.lock();
        if *state != JobState::Paused {
            return false;
        }
        *state = JobState::Running;
        self.changed.notify_all();
        true
    }

    /// Moves to `Stopped` from any state. Returns false if already stopped.
    pub fn stop(&self) -> bool {
        let mut state = self.lock();
        if *state == JobState::Stopped {
            return false;
        }
        *state = JobState::Stopped;
        self.changed.notify_all();
        true
    }

    /// Blocks while paused; breaks once stopped.
    pub fn wait_while_paused(&self) -> ControlFlow<()> {
        let state = self
            .changed
            .wait_while(self.lock(), |state| *state == JobState::Paused)
            .unwrap_or_else(PoisonError::into_inner);
        if *state == JobState::Stopped {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Runs `f` under the gate lock unless the gate is stopped.
    ///
    /// `stop` cannot complete while `f` runs, so anything done here happens
    /// entirely before the stop or not at all.
    pub fn while_live<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let state = self.lock();
        if *state == JobState::Stopped {
            return None;
        }
        let result = f();
        drop(state);
        Some(result)
    }

    /// Runs `f` under the gate lock only while running.
    pub fn while_running<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let state = self.lock();
        if *state != JobState::Running {
            return None;
        }
        let result = f();
        drop(state);
        Some(result)
    }
}

impl Default for RunGate {
    fn default() -> Self {
        Self::new()
    }
}
