//! ChipForge job control
//!
//! This crate sits between a presentation layer and a chip-placement
//! search engine:
//! - Candidate filtering and inventory validation
//! - Strategy selection (precomputed dictionary or general fallback)
//! - The search-engine seam and its worker thread
//! - The job lifecycle controller (`Stopped`, `Running`, `Paused`)
//! - Progress tracking with a sliding-window ETA
//! - Job records and event listeners

pub mod clock;
pub mod engine;
pub mod event;
pub mod filter;
pub mod manager;
pub mod progress;
pub mod record;
pub mod strategy;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{
    ClosureEngineFactory, EngineFactory, EngineFault, EngineHandle, SearchContext, SearchEngine,
    SearchOutcome,
};
pub use event::{CountingEventListener, JobEventListener, JobEventSupport, LoggingEventListener};
pub use filter::{filter_candidates, validate_inventory};
pub use manager::{
    CompletionLabel, ElapsedTimer, ExportError, JobController, JobControllerBuilder, JobHandle,
    JobOutcome, ProgressReport, StartError,
};
pub use progress::{DeltaWindow, Eta, ProgressTracker, ResultView, ETA_WINDOW};
pub use record::{JobRecord, JobStatus, RecordError};
pub use strategy::{
    select_strategy, AbortReason, ChoiceProvider, StrategyDecision, StrategyOption,
    StrategyPrompt,
};
