//! The seam between the job controller and a search engine.
//!
//! An engine implements [`SearchEngine`]; it is created per job by an
//! [`EngineFactory`] and driven by an [`EngineHandle`], which runs it on a
//! dedicated worker thread. The engine talks back through its
//! [`SearchContext`]: it checks for pause and stop at safe points, reports
//! progress, publishes combinations and offers previews.

mod context;
mod gate;
mod handle;

use std::fmt::Debug;

use chipforge_core::domain::{JobDescriptor, Strategy};
use thiserror::Error;

pub use context::SearchContext;
pub use gate::RunGate;
pub use handle::{EngineHandle, Finish};

/// How a search ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// The whole search space was enumerated.
    Exhausted,
    /// The search returned early after a stop request.
    Interrupted,
}

/// A search that could not run to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("search engine panicked: {0}")]
    Panicked(String),

    #[error("search engine failed: {0}")]
    Failed(String),

    #[error("could not start search worker: {0}")]
    Spawn(String),
}

/// A combinatorial search over one job's candidates.
///
/// `search` runs on the worker thread. Implementations must call
/// [`SearchContext::checkpoint`] regularly and return once it breaks.
pub trait SearchEngine: Send {
    fn search(
        &mut self,
        job: &JobDescriptor,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome, EngineFault>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "search"
    }
}

/// Creates a fresh engine for each job.
pub trait EngineFactory: Send + Sync {
    fn create_engine(&self, strategy: &Strategy) -> Box<dyn SearchEngine>;
}

/// An engine factory backed by a closure.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::{JobDescriptor, Strategy};
/// use chipforge_solver::engine::{
///     ClosureEngineFactory, EngineFactory, EngineFault, SearchContext, SearchEngine,
///     SearchOutcome,
/// };
///
/// struct Nothing;
///
/// impl SearchEngine for Nothing {
///     fn search(
///         &mut self,
///         _job: &JobDescriptor,
///         _ctx: &mut SearchContext,
///     ) -> Result<SearchOutcome, EngineFault> {
///         Ok(SearchOutcome::Exhausted)
///     }
/// }
///
/// let factory = ClosureEngineFactory::new(|_: &Strategy| Box::new(Nothing) as Box<dyn SearchEngine>);
/// let engine = factory.create_engine(&Strategy::Fallback);
/// assert_eq!(engine.name(), "search");
/// ```
pub struct ClosureEngineFactory<F> {
    factory: F,
}

impl<F> ClosureEngineFactory<F>
where
    F: Fn(&Strategy) -> Box<dyn SearchEngine> + Send + Sync,
{
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F> EngineFactory for ClosureEngineFactory<F>
where
    F: Fn(&Strategy) -> Box<dyn SearchEngine> + Send + Sync,
{
    fn create_engine(&self, strategy: &Strategy) -> Box<dyn SearchEngine> {
        (self.factory)(strategy)
    }
}

impl<F> Debug for ClosureEngineFactory<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureEngineFactory").finish()
    }
}
