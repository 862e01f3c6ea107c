//! ChipForge - job control for chip-to-board combinatorial search
//!
//! Wire in your board and preset catalogs and a search engine, then drive
//! jobs through the [`JobController`](prelude::JobController).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chipforge::prelude::*;
//! use chipforge_test::catalog::StaticCatalog;
//!
//! struct Exhausted;
//!
//! impl SearchEngine for Exhausted {
//!     fn search(
//!         &mut self,
//!         _job: &JobDescriptor,
//!         _ctx: &mut SearchContext,
//!     ) -> Result<SearchOutcome, EngineFault> {
//!         Ok(SearchOutcome::Exhausted)
//!     }
//! }
//!
//! let catalog = Arc::new(StaticCatalog::new().with_fallback_preset("Alpha", 5));
//! let engines = Arc::new(ClosureEngineFactory::new(|_: &Strategy| {
//!     Box::new(Exhausted) as Box<dyn SearchEngine>
//! }));
//! let controller = chipforge::controller(catalog.clone(), catalog, engines);
//! assert_eq!(controller.state(), JobState::Stopped);
//! ```

pub use chipforge_config::{ChipForgeConfig, ConfigError};
pub use chipforge_core::{ChipForgeError, Result};

mod controller;
pub use controller::{controller, CONFIG_FILE};

#[cfg(feature = "console")]
pub use chipforge_console as console;

pub mod prelude {
    pub use chipforge_core::domain::{
        BoardCatalog, BoardCombination, BoardRef, CandidateSet, CellType, Chip, Color,
        JobDescriptor, JobId, JobState, Placement, PresetCatalog, PreviewArtifact,
        ResultSnapshot, SettingsSnapshot, StatPoints, Strategy,
    };
    pub use chipforge_solver::{
        ChoiceProvider, ClosureEngineFactory, CompletionLabel, EngineFactory, EngineFault,
        JobController, JobControllerBuilder, JobHandle, JobRecord, ProgressReport, ResultView,
        SearchContext, SearchEngine, SearchOutcome, StartError, StrategyOption, StrategyPrompt,
    };
}
