//! Test utilities for chipforge-solver
//!
//! Scripted engines and choice providers used across the crate's test
//! modules. Chip and catalog fixtures come from chipforge-test.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chipforge_core::domain::{
    BoardCombination, JobDescriptor, JobState, Placement, PreviewArtifact, Strategy,
};

use crate::engine::{
    ClosureEngineFactory, EngineFactory, EngineFault, SearchContext, SearchEngine, SearchOutcome,
};
use crate::manager::{JobController, ProgressReport};
use crate::strategy::{ChoiceProvider, StrategyOption, StrategyPrompt};

// ============================================================================
// Scripted choices
// ============================================================================

/// Answers prompts from a fixed script and records every prompt shown.
///
/// Once the script runs out every further prompt is cancelled.
#[derive(Debug, Default)]
pub struct ScriptedChoices {
    answers: Vec<Option<StrategyOption>>,
    prompts: Vec<StrategyPrompt>,
}

impl ScriptedChoices {
    pub fn new(answers: Vec<Option<StrategyOption>>) -> Self {
        Self {
            answers,
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[StrategyPrompt] {
        &self.prompts
    }
}

impl ChoiceProvider for ScriptedChoices {
    fn choose(&mut self, prompt: &StrategyPrompt) -> Option<StrategyOption> {
        self.prompts.push(*prompt);
        if self.answers.is_empty() {
            None
        } else {
            self.answers.remove(0)
        }
    }
}

// ============================================================================
// Scripted engines
// ============================================================================

/// What a [`ScriptedEngine`] does when searched.
#[derive(Debug, Clone)]
pub enum Script {
    /// Publishes each combination after a checkpoint, then reports the
    /// search space exhausted.
    Exhaust(Vec<BoardCombination>),
    /// Reports progress at every checkpoint until stopped.
    UntilStopped,
    /// Publishes at every step without checkpoints until a publish is
    /// rejected.
    PublishUntilRejected,
    /// Reports progress and offers a preview of step `n` at every
    /// checkpoint until stopped.
    Previews,
    /// Spins without checkpoints and reports the search space exhausted
    /// as soon as it sees the job paused.
    FinishWhenPaused,
    Panic(&'static str),
    Fail(&'static str),
}

#[derive(Debug)]
pub struct ScriptedEngine {
    script: Script,
}

impl ScriptedEngine {
    pub fn new(script: Script) -> Self {
        Self { script }
    }
}

const STEP: Duration = Duration::from_millis(1);
const TOTAL: u64 = 1_000_000;

impl SearchEngine for ScriptedEngine {
    fn search(
        &mut self,
        _job: &JobDescriptor,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome, EngineFault> {
        match &self.script {
            Script::Exhaust(boards) => {
                for (i, board) in boards.iter().enumerate() {
                    if ctx.checkpoint().is_break() {
                        return Ok(SearchOutcome::Interrupted);
                    }
                    ctx.report_progress(i as u64, boards.len() as u64);
                    ctx.publish(board.clone());
                }
                Ok(SearchOutcome::Exhausted)
            }
            Script::UntilStopped => {
                let mut step = 0;
                while let ControlFlow::Continue(()) = ctx.checkpoint() {
                    ctx.report_progress(step, TOTAL);
                    step += 1;
                    thread::sleep(STEP);
                }
                Ok(SearchOutcome::Interrupted)
            }
            Script::PublishUntilRejected => {
                let mut step = 0;
                while ctx.publish(combo(step)) {
                    step += 1;
                    thread::sleep(STEP);
                }
                Ok(SearchOutcome::Interrupted)
            }
            Script::Previews => {
                let mut step = 0;
                while let ControlFlow::Continue(()) = ctx.checkpoint() {
                    ctx.report_progress(step as u64, TOTAL);
                    ctx.preview(PreviewArtifact { board: combo(step) });
                    step += 1;
                    thread::sleep(STEP);
                }
                Ok(SearchOutcome::Interrupted)
            }
            Script::FinishWhenPaused => {
                while !ctx.is_stop_requested() {
                    if ctx.gate().state() == JobState::Paused {
                        return Ok(SearchOutcome::Exhausted);
                    }
                    thread::sleep(STEP);
                }
                Ok(SearchOutcome::Interrupted)
            }
            Script::Panic(message) => panic!("{message}"),
            Script::Fail(message) => Err(EngineFault::Failed(message.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Factory handing out a fresh [`ScriptedEngine`] per job.
pub fn scripted_factory(script: Script) -> Arc<dyn EngineFactory> {
    Arc::new(ClosureEngineFactory::new(move |_: &Strategy| {
        Box::new(ScriptedEngine::new(script.clone())) as Box<dyn SearchEngine>
    }))
}

/// A one-chip combination distinguished by `candidate`.
pub fn combo(candidate: usize) -> BoardCombination {
    BoardCombination::new(vec![Placement {
        candidate,
        rotation: 0,
        row: 0,
        col: 0,
    }])
}

// ============================================================================
// Waiting
// ============================================================================

const WAIT_LIMIT: Duration = Duration::from_secs(5);

/// Polls `condition` until it holds. Panics after five seconds.
pub fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + WAIT_LIMIT;
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::sleep(STEP);
    }
}

/// Polls the controller until the job has stopped on its own.
pub fn wait_until_stopped(controller: &mut JobController) -> ProgressReport {
    let mut report = controller.poll_progress();
    wait_for(|| {
        report = controller.poll_progress();
        report.state == JobState::Stopped
    });
    report
}
