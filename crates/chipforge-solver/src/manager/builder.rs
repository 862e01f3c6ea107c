//! Builder for [`JobController`].

use std::sync::Arc;

use chipforge_config::ChipForgeConfig;
use chipforge_core::domain::{BoardCatalog, PresetCatalog};

use super::controller::JobController;
use crate::clock::{Clock, SystemClock};
use crate::engine::EngineFactory;
use crate::event::{JobEventListener, JobEventSupport};

/// Builds a [`JobController`].
///
/// Catalogs and the engine factory are required; the clock defaults to
/// [`SystemClock`] and the configuration to [`ChipForgeConfig::default`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chipforge_core::domain::{Color, JobDescriptor, JobState, Strategy};
/// use chipforge_solver::engine::{
///     ClosureEngineFactory, EngineFault, SearchContext, SearchEngine, SearchOutcome,
/// };
/// use chipforge_solver::manager::JobControllerBuilder;
/// use chipforge_test::catalog::StaticCatalog;
///
/// struct Idle;
///
/// impl SearchEngine for Idle {
///     fn search(
///         &mut self,
///         _job: &JobDescriptor,
///         _ctx: &mut SearchContext,
///     ) -> Result<SearchOutcome, EngineFault> {
///         Ok(SearchOutcome::Exhausted)
///     }
/// }
///
/// let catalog = Arc::new(StaticCatalog::new().with_board("Alpha", Color::Orange, 36));
/// let controller = JobControllerBuilder::new(
///     catalog.clone(),
///     catalog,
///     Arc::new(ClosureEngineFactory::new(|_: &Strategy| {
///         Box::new(Idle) as Box<dyn SearchEngine>
///     })),
/// )
/// .build();
///
/// assert_eq!(controller.state(), JobState::Stopped);
/// ```
pub struct JobControllerBuilder {
    boards: Arc<dyn BoardCatalog>,
    presets: Arc<dyn PresetCatalog>,
    engines: Arc<dyn EngineFactory>,
    clock: Option<Arc<dyn Clock>>,
    config: ChipForgeConfig,
    events: JobEventSupport,
}

impl JobControllerBuilder {
    pub fn new(
        boards: Arc<dyn BoardCatalog>,
        presets: Arc<dyn PresetCatalog>,
        engines: Arc<dyn EngineFactory>,
    ) -> Self {
        Self {
            boards,
            presets,
            engines,
            clock: None,
            config: ChipForgeConfig::default(),
            events: JobEventSupport::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_config(mut self, config: ChipForgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn JobEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn build(self) -> JobController {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()));
        JobController::new(
            self.boards,
            self.presets,
            self.engines,
            clock,
            self.config,
            self.events,
        )
    }
}
