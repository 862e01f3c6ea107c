//! Callbacks available to a running engine.

use std::ops::ControlFlow;
use std::sync::Arc;

use chipforge_core::domain::{
    BoardCombination, JobState, PreviewArtifact, ProgressSample, ResultSnapshot,
};
use tokio::sync::watch;

use super::gate::RunGate;
use crate::clock::Clock;
use crate::progress::ProgressTracker;

/// The engine's view of its job control.
///
/// Owned by the worker thread for the duration of one search.
#[derive(Debug)]
pub struct SearchContext {
    gate: Arc<RunGate>,
    results: Arc<watch::Sender<ResultSnapshot>>,
    tracker: Arc<ProgressTracker>,
    clock: Arc<dyn Clock>,
    previews: Option<watch::Sender<Option<PreviewArtifact>>>,
}

impl SearchContext {
    pub(crate) fn new(
        gate: Arc<RunGate>,
        results: Arc<watch::Sender<ResultSnapshot>>,
        tracker: Arc<ProgressTracker>,
        clock: Arc<dyn Clock>,
        previews: Option<watch::Sender<Option<PreviewArtifact>>>,
    ) -> Self {
        Self {
            gate,
            results,
            tracker,
            clock,
            previews,
        }
    }

    /// Safe point: blocks while the job is paused, breaks once it is
    /// stopped.
    pub fn checkpoint(&self) -> ControlFlow<()> {
        self.gate.wait_while_paused()
    }

    pub fn is_stop_requested(&self) -> bool {
        self.gate.state() == JobState::Stopped
    }

    /// Reports how far the search has got, stamped with the job clock.
    ///
    /// The found count is not reported here: the tracker counts every
    /// combination accepted by [`SearchContext::publish`].
    pub fn report_progress(&self, enumerated: u64, total_estimate: u64) {
        self.tracker.on_sample(ProgressSample {
            timestamp_millis: self.clock.now_millis(),
            enumerated,
            total_estimate,
            ..ProgressSample::default()
        });
    }

    /// Appends a discovered combination to the job's results.
    ///
    /// Returns false, dropping the combination, once the job is stopped.
    pub fn publish(&self, board: BoardCombination) -> bool {
        let accepted = self
            .gate
            .while_live(|| self.results.send_modify(|snapshot| snapshot.push(board)))
            .is_some();
        if accepted {
            self.tracker.on_result_appended();
        }
        accepted
    }

    /// Offers a preview while the job is running, replacing any preview
    /// not yet taken. Returns false if previews are disabled or the job is
    /// not running.
    pub fn preview(&self, artifact: PreviewArtifact) -> bool {
        let Some(previews) = &self.previews else {
            return false;
        };
        self.gate
            .while_running(|| previews.send_replace(Some(artifact)))
            .is_some()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn gate(&self) -> &RunGate {
        &self.gate
    }
}
