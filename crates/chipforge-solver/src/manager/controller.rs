//! The lifecycle controller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chipforge_config::ChipForgeConfig;
use chipforge_core::domain::{
    BoardCatalog, BoardRef, Chip, JobDescriptor, JobId, JobState, PresetCatalog,
    PreviewArtifact, ResultSnapshot, SettingsSnapshot, StrategyKind,
};
use tracing::{debug, info, warn};

use super::elapsed::ElapsedTimer;
use super::report::{
    CompletionLabel, ExportError, JobHandle, JobOutcome, ProgressReport, StartError,
};
use crate::clock::Clock;
use crate::engine::{EngineFactory, EngineHandle, Finish, SearchOutcome};
use crate::event::{JobEventListener, JobEventSupport};
use crate::filter::{filter_candidates, validate_inventory};
use crate::progress::ProgressTracker;
use crate::record::JobRecord;
use crate::strategy::{select_strategy, ChoiceProvider, StrategyDecision};

/// Where the current job's results live.
#[derive(Debug)]
enum JobResults {
    /// A job started in this session; the worker may still be attached.
    Live(EngineHandle),
    /// A job loaded from a record.
    Restored(ResultSnapshot),
}

/// The current or last job.
#[derive(Debug)]
struct CurrentJob {
    id: JobId,
    board: BoardRef,
    strategy: StrategyKind,
    settings: SettingsSnapshot,
    timer: ElapsedTimer,
    results: JobResults,
    outcome: Option<JobOutcome>,
}

impl CurrentJob {
    fn snapshot(&self) -> ResultSnapshot {
        match &self.results {
            JobResults::Live(handle) => handle.peek_results(),
            JobResults::Restored(snapshot) => snapshot.clone(),
        }
    }

    fn handle(&self) -> Option<&EngineHandle> {
        match &self.results {
            JobResults::Live(handle) => Some(handle),
            JobResults::Restored(_) => None,
        }
    }

    fn handle_mut(&mut self) -> Option<&mut EngineHandle> {
        match &mut self.results {
            JobResults::Live(handle) => Some(handle),
            JobResults::Restored(_) => None,
        }
    }
}

/// Owns at most one job and moves it through `Stopped`, `Running` and
/// `Paused`.
///
/// Every method returns without waiting on the search. Completion of the
/// worker is picked up by the next call (any call), so a presentation
/// loop polling [`JobController::poll_progress`] observes it within one
/// poll interval.
///
/// Invalid transitions (`pause` while stopped, `resume` while running,
/// `stop` while stopped) return `false` and change nothing.
pub struct JobController {
    boards: Arc<dyn BoardCatalog>,
    presets: Arc<dyn PresetCatalog>,
    engines: Arc<dyn EngineFactory>,
    clock: Arc<dyn Clock>,
    config: ChipForgeConfig,
    events: JobEventSupport,
    state: JobState,
    current: Option<CurrentJob>,
    force_refresh: bool,
}

impl JobController {
    pub(super) fn new(
        boards: Arc<dyn BoardCatalog>,
        presets: Arc<dyn PresetCatalog>,
        engines: Arc<dyn EngineFactory>,
        clock: Arc<dyn Clock>,
        config: ChipForgeConfig,
        events: JobEventSupport,
    ) -> Self {
        Self {
            boards,
            presets,
            engines,
            clock,
            config,
            events,
            state: JobState::Stopped,
            current: None,
            force_refresh: false,
        }
    }

    /// State as of the last controller call.
    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn config(&self) -> &ChipForgeConfig {
        &self.config
    }

    pub fn add_listener(&mut self, listener: Arc<dyn JobEventListener>) {
        self.events.add_listener(listener);
    }

    /// Starts a job for `board` over a copy of `inventory`.
    ///
    /// In order: rejects if a job is active, validates every chip's point
    /// allocation, selects a strategy (possibly prompting through
    /// `choices`), filters the candidates and hands the new descriptor to
    /// a fresh engine. Any failure leaves the controller untouched.
    pub fn start(
        &mut self,
        board: &BoardRef,
        inventory: &[Chip],
        settings: &SettingsSnapshot,
        choices: &mut dyn ChoiceProvider,
    ) -> Result<JobHandle, StartError> {
        self.reap();
        if self.state.is_active() {
            debug!(state = %self.state, "start ignored, job already active");
            return Err(StartError::AlreadyActive);
        }
        if let Some(index) = validate_inventory(inventory) {
            warn!(board = %board, index, "inventory has an invalid point allocation");
            return Err(StartError::InvalidInventory { index });
        }

        let strategy = match select_strategy(board, inventory, self.presets.as_ref(), choices) {
            StrategyDecision::Selected(strategy) => strategy,
            StrategyDecision::Aborted(reason) => {
                info!(board = %board, %reason, "start aborted");
                return Err(StartError::Aborted(reason));
            }
        };

        let candidates = filter_candidates(
            inventory,
            board,
            self.boards.as_ref(),
            settings,
            strategy.size_floor(),
        );
        let descriptor = Arc::new(JobDescriptor::new(
            board.clone(),
            strategy,
            candidates,
            settings.clone(),
        ));

        let engine = self.engines.create_engine(descriptor.strategy());
        let tracker = Arc::new(ProgressTracker::new(self.config.controller.eta_warning_secs));
        let timer = ElapsedTimer::start(self.clock.now_millis());
        let handle = EngineHandle::set(
            Arc::clone(&descriptor),
            engine,
            Arc::clone(&self.clock),
            tracker,
        )
        .map_err(|fault| StartError::Engine(fault.to_string()))?;

        info!(
            event = "job_start",
            job_id = %descriptor.id(),
            board = %descriptor.board(),
            strategy = %descriptor.strategy(),
            candidates = descriptor.candidates().len(),
            "job started"
        );

        self.current = Some(CurrentJob {
            id: descriptor.id(),
            board: descriptor.board().clone(),
            strategy: descriptor.strategy().kind(),
            settings: descriptor.settings().clone(),
            timer,
            results: JobResults::Live(handle),
            outcome: None,
        });
        self.transition(JobState::Running);
        Ok(JobHandle::new(descriptor))
    }

    /// Starts a job using the configured `[settings]` section.
    pub fn start_with_defaults(
        &mut self,
        board: &BoardRef,
        inventory: &[Chip],
        choices: &mut dyn ChoiceProvider,
    ) -> Result<JobHandle, StartError> {
        let settings = self.config.settings.clone();
        self.start(board, inventory, &settings, choices)
    }

    /// `Running -> Paused`. The engine suspends at its next checkpoint.
    pub fn pause(&mut self) -> bool {
        self.reap();
        if self.state != JobState::Running {
            debug!(state = %self.state, "pause ignored");
            return false;
        }
        let now = self.clock.now_millis();
        let Some(job) = self.current.as_mut() else {
            return false;
        };
        if let Some(handle) = job.handle_mut() {
            handle.pause();
            handle.tracker().reset_window();
        }
        job.timer.pause(now);
        info!(event = "job_pause", job_id = %job.id, elapsed_ms = job.timer.elapsed(now), "job paused");
        self.transition(JobState::Paused);
        true
    }

    /// `Paused -> Running`.
    pub fn resume(&mut self) -> bool {
        self.reap();
        if self.state != JobState::Paused {
            debug!(state = %self.state, "resume ignored");
            return false;
        }
        let now = self.clock.now_millis();
        let Some(job) = self.current.as_mut() else {
            return false;
        };
        job.timer.resume(now);
        if let Some(handle) = job.handle() {
            handle.tracker().reset_window();
            handle.resume();
        }
        info!(event = "job_resume", job_id = %job.id, elapsed_ms = job.timer.elapsed(now), "job resumed");
        self.transition(JobState::Running);
        true
    }

    /// Stops the active job and freezes its results. A no-op when
    /// already stopped.
    pub fn stop(&mut self) -> bool {
        self.reap();
        if !self.state.is_active() {
            debug!("stop ignored, no active job");
            return false;
        }
        let now = self.clock.now_millis();
        self.finalize(JobOutcome::Stopped, now);
        true
    }

    /// Picks up a finished worker, if any.
    fn reap(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let Some(finish) = self
            .current
            .as_ref()
            .and_then(CurrentJob::handle)
            .and_then(EngineHandle::take_finish)
        else {
            return;
        };
        let Finish { result, at_millis } = finish;
        let outcome = match result {
            Ok(SearchOutcome::Exhausted) => JobOutcome::Completed,
            Ok(SearchOutcome::Interrupted) => JobOutcome::Stopped,
            Err(fault) => JobOutcome::Failed(fault.to_string()),
        };
        self.finalize(outcome, at_millis);
    }

    fn finalize(&mut self, outcome: JobOutcome, at_millis: u64) {
        let Some(job) = self.current.as_mut() else {
            return;
        };
        job.timer.finish(at_millis);
        if let Some(handle) = job.handle() {
            handle.stop();
            handle.tracker().reset_window();
        }
        let count = job.snapshot().len();
        let elapsed_ms = job.timer.elapsed(at_millis);
        let id = job.id;

        match &outcome {
            JobOutcome::Completed => info!(
                event = "job_complete",
                job_id = %id,
                results = count,
                elapsed_ms,
                "search space exhausted"
            ),
            JobOutcome::Stopped => info!(
                event = "job_stop",
                job_id = %id,
                results = count,
                elapsed_ms,
                "job stopped"
            ),
            JobOutcome::Failed(message) => warn!(
                event = "job_failed",
                job_id = %id,
                results = count,
                elapsed_ms,
                error = %message,
                "search failed"
            ),
        }

        job.outcome = Some(outcome.clone());
        self.transition(JobState::Stopped);
        self.events.fire_job_finished(id, &outcome, count);
    }

    fn transition(&mut self, to: JobState) {
        let from = self.state;
        self.state = to;
        self.force_refresh = true;
        if let Some(job) = &self.current {
            self.events.fire_state_changed(job.id, from, to);
        }
    }

    /// Progress for one presentation poll.
    ///
    /// `refresh` is set when the results changed since they were last read
    /// or the state changed since the last poll. Polling does not mark the
    /// results as read.
    pub fn poll_progress(&mut self) -> ProgressReport {
        self.reap();
        let now = self.clock.now_millis();
        let forced = std::mem::take(&mut self.force_refresh);
        let completion = self.completion_label();

        let Some(job) = &self.current else {
            return ProgressReport {
                state: self.state,
                elapsed_ms: 0,
                eta: None,
                enumerated: 0,
                total: 0,
                found: 0,
                revision: 0,
                refresh: forced,
                completion,
            };
        };

        let snapshot = job.snapshot();
        let (sample, eta, changed) = match &job.results {
            JobResults::Live(handle) => {
                let tracker = handle.tracker();
                let eta = if self.state == JobState::Running {
                    tracker.eta()
                } else {
                    None
                };
                (tracker.latest(), eta, handle.results_updated())
            }
            JobResults::Restored(_) => (Default::default(), None, false),
        };

        ProgressReport {
            state: self.state,
            elapsed_ms: job.timer.elapsed(now),
            eta,
            enumerated: sample.enumerated,
            total: sample.total_estimate,
            found: snapshot.len() as u64,
            revision: snapshot.revision(),
            refresh: changed || forced,
            completion,
        }
    }

    /// True if results were appended since [`JobController::results`] was
    /// last called. Stays true until then.
    pub fn boards_updated(&mut self) -> bool {
        self.reap();
        self.current
            .as_ref()
            .and_then(CurrentJob::handle)
            .is_some_and(EngineHandle::results_updated)
    }

    /// The current results, marking them as read.
    pub fn results(&mut self) -> ResultSnapshot {
        self.reap();
        match self.current.as_mut().map(|job| &mut job.results) {
            Some(JobResults::Live(handle)) => handle.results(),
            Some(JobResults::Restored(snapshot)) => snapshot.clone(),
            None => ResultSnapshot::new(),
        }
    }

    /// True if the result revision differs from `revision`. Does not mark
    /// anything as read.
    pub fn results_changed_since(&self, revision: u64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|job| job.snapshot().revision() != revision)
    }

    pub fn elapsed_ms(&mut self) -> u64 {
        self.reap();
        let now = self.clock.now_millis();
        self.current
            .as_ref()
            .map_or(0, |job| job.timer.elapsed(now))
    }

    pub fn completion_label(&self) -> CompletionLabel {
        if self.state.is_active() {
            return CompletionLabel::Idle;
        }
        match &self.current {
            Some(job) => match &job.outcome {
                Some(outcome) => {
                    CompletionLabel::for_outcome(outcome, job.snapshot().len() as u64)
                }
                None => CompletionLabel::Idle,
            },
            None => CompletionLabel::Idle,
        }
    }

    /// Latest preview offered by the engine. `None` unless running.
    pub fn take_preview(&mut self) -> Option<PreviewArtifact> {
        self.reap();
        if self.state != JobState::Running {
            return None;
        }
        self.current
            .as_mut()
            .and_then(CurrentJob::handle_mut)
            .and_then(EngineHandle::take_preview)
    }

    /// Record of the finished job, if the controller is stopped and holds
    /// one.
    pub fn job_record(&self) -> Option<JobRecord> {
        if self.state.is_active() {
            return None;
        }
        let job = self.current.as_ref()?;
        let outcome = job.outcome.as_ref()?;
        Some(JobRecord::new(
            job.id,
            outcome,
            job.timer.elapsed(self.clock.now_millis()),
            job.board.clone(),
            job.strategy,
            job.settings.clone(),
            job.snapshot().boards().to_vec(),
        ))
    }

    /// Writes the finished job's record to `path`, with the configured
    /// record extension. Returns the path written.
    pub fn export_results(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        self.reap();
        if self.state.is_active() {
            return Err(ExportError::NotStopped);
        }
        let record = self
            .job_record()
            .filter(|record| record.result_count > 0)
            .ok_or(ExportError::NoResults)?;
        let path = self.config.records.with_extension(path.as_ref());
        record.save(&path)?;
        info!(event = "job_export", job_id = %record.id, path = %path.display(), "results exported");
        Ok(path)
    }

    /// Shows a persisted job. Only allowed while stopped; the controller
    /// stays stopped.
    pub fn restore(&mut self, record: JobRecord) -> bool {
        self.reap();
        if self.state.is_active() {
            debug!("restore ignored, job active");
            return false;
        }
        let outcome = record.outcome();
        info!(
            event = "job_restore",
            job_id = %record.id,
            board = %record.board,
            results = record.result_count,
            "job restored"
        );
        self.current = Some(CurrentJob {
            id: record.id,
            board: record.board,
            strategy: record.strategy,
            settings: record.settings,
            timer: ElapsedTimer::fixed(record.elapsed_ms),
            results: JobResults::Restored(ResultSnapshot::from_boards(record.results)),
            outcome: Some(outcome),
        });
        self.force_refresh = true;
        true
    }
}

impl std::fmt::Debug for JobController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobController")
            .field("state", &self.state)
            .field("current", &self.current.as_ref().map(|job| job.id))
            .field("events", &self.events)
            .finish()
    }
}
