//! Job lifecycle management.
//!
//! The [`JobController`] is the presentation layer's single entry point:
//! it starts jobs (strategy selection, filtering, engine hand-off), moves
//! them through `Running`, `Paused` and `Stopped`, and reports progress
//! and results.
//!
//! # Overview
//!
//! - [`JobController`]: the state machine owning at most one job
//! - [`JobControllerBuilder`]: wires catalogs, engines, clock and config
//! - [`ElapsedTimer`]: pause-aware elapsed time
//! - [`ProgressReport`] and [`CompletionLabel`]: what a poll returns

mod builder;
mod controller;
mod elapsed;
mod report;

#[cfg(test)]
mod mod_tests;

pub use builder::JobControllerBuilder;
pub use controller::JobController;
pub use elapsed::ElapsedTimer;
pub use report::{
    CompletionLabel, ExportError, JobHandle, JobOutcome, ProgressReport, StartError,
};
