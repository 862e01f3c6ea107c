//! Worker thread ownership and the engine primitive surface.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use chipforge_core::domain::{JobDescriptor, JobState, PreviewArtifact, ResultSnapshot};
use tokio::sync::watch;
use tracing::{debug, info};

use super::context::SearchContext;
use super::gate::RunGate;
use super::{EngineFault, SearchEngine, SearchOutcome};
use crate::clock::Clock;
use crate::progress::ProgressTracker;

/// How and when the worker finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finish {
    pub result: Result<SearchOutcome, EngineFault>,
    /// Job clock reading taken as the search returned.
    pub at_millis: u64,
}

/// Drives one engine on its own worker thread.
///
/// Every method returns immediately; the worker is never joined. Dropping
/// the handle stops the worker.
#[derive(Debug)]
pub struct EngineHandle {
    job: Arc<JobDescriptor>,
    engine_name: &'static str,
    gate: Arc<RunGate>,
    results: watch::Receiver<ResultSnapshot>,
    // Keeps the channel open after the worker exits.
    _publisher: Arc<watch::Sender<ResultSnapshot>>,
    tracker: Arc<ProgressTracker>,
    finish: Arc<Mutex<Option<Finish>>>,
    previews: Option<watch::Receiver<Option<PreviewArtifact>>>,
}

impl EngineHandle {
    /// Hands `job` to `engine` and starts the worker.
    pub fn set(
        job: Arc<JobDescriptor>,
        mut engine: Box<dyn SearchEngine>,
        clock: Arc<dyn Clock>,
        tracker: Arc<ProgressTracker>,
    ) -> Result<Self, EngineFault> {
        let gate = Arc::new(RunGate::new());
        let (publisher, results) = watch::channel(ResultSnapshot::new());
        let publisher = Arc::new(publisher);
        let finish = Arc::new(Mutex::new(None));

        let (preview_tx, preview_rx) = if job.settings().show_progress_image {
            let (tx, rx) = watch::channel(None);
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        let mut ctx = SearchContext::new(
            Arc::clone(&gate),
            Arc::clone(&publisher),
            Arc::clone(&tracker),
            clock,
            preview_tx,
        );
        let engine_name = engine.name();
        let worker_job = Arc::clone(&job);
        let worker_finish = Arc::clone(&finish);

        thread::Builder::new()
            .name("chipforge-search".to_string())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    engine.search(&worker_job, &mut ctx)
                }))
                .unwrap_or_else(|payload| Err(EngineFault::Panicked(panic_message(&*payload))));
                let at_millis = ctx.clock().now_millis();

                debug!(
                    job_id = %worker_job.id(),
                    engine = engine_name,
                    ?result,
                    "search returned"
                );
                *worker_finish
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Finish { result, at_millis });
                ctx.gate().stop();
            })
            .map_err(|e| EngineFault::Spawn(e.to_string()))?;

        info!(
            job_id = %job.id(),
            engine = engine_name,
            candidates = job.candidates().len(),
            "search worker started"
        );

        Ok(Self {
            job,
            engine_name,
            gate,
            results,
            _publisher: publisher,
            tracker,
            finish,
            previews: preview_rx,
        })
    }

    pub fn job(&self) -> &Arc<JobDescriptor> {
        &self.job
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine_name
    }

    /// Pauses the worker and discards any preview not yet taken.
    pub fn pause(&mut self) -> bool {
        if !self.gate.pause() {
            return false;
        }
        self.discard_preview();
        true
    }

    pub fn resume(&self) -> bool {
        self.gate.resume()
    }

    /// Asks the worker to stop and freezes the result set.
    pub fn stop(&self) -> bool {
        self.gate.stop()
    }

    pub fn status(&self) -> JobState {
        self.gate.state()
    }

    /// True if results were appended since the last [`EngineHandle::results`]
    /// call. Repeated checks do not clear it.
    pub fn results_updated(&self) -> bool {
        self.results.has_changed().unwrap_or(false)
    }

    /// Current results; marks them as seen.
    pub fn results(&mut self) -> ResultSnapshot {
        self.results.borrow_and_update().clone()
    }

    /// Current results without marking them as seen.
    pub fn peek_results(&self) -> ResultSnapshot {
        self.results.borrow().clone()
    }

    /// Takes the worker's finish record once it has returned.
    pub fn take_finish(&self) -> Option<Finish> {
        self.finish
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Latest preview the engine offered since the last take. Always
    /// `None` unless the worker is running.
    pub fn take_preview(&mut self) -> Option<PreviewArtifact> {
        if self.status() != JobState::Running {
            self.discard_preview();
            return None;
        }
        let previews = self.previews.as_mut()?;
        if !previews.has_changed().unwrap_or(false) {
            return None;
        }
        previews.borrow_and_update().clone()
    }

    fn discard_preview(&mut self) {
        if let Some(previews) = self.previews.as_mut() {
            previews.mark_unchanged();
        }
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.gate.stop();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
