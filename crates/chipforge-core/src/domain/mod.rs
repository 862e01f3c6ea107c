//! Domain model for chip assignment jobs
//!
//! These types describe one job and its inputs:
//! - `BoardRef`: The board being filled
//! - `Chip`: Inventory items and their size, colour and points
//! - `Strategy`: How the engine will search
//! - `CandidateSet` / `JobDescriptor`: Immutable job inputs
//! - `ProgressSample` / `ResultSnapshot`: What the engine reports back

mod board;
mod candidate;
mod catalog;
mod chip;
mod job;
mod progress;
mod settings;
mod strategy;

#[cfg(test)]
mod tests;

pub use board::{BoardRef, MAX_BOARD_STAR, MIN_BOARD_STAR};
pub use candidate::CandidateSet;
pub use catalog::{BoardCatalog, PresetCatalog};
pub use chip::{CellType, Chip, Color, StatPoints, MAX_CHIP_CELLS, MAX_CHIP_LEVEL};
pub use job::{JobDescriptor, JobId, JobState};
pub use progress::{BoardCombination, Placement, PreviewArtifact, ProgressSample, ResultSnapshot};
pub use settings::{MarkType, SettingsSnapshot, SortType, UNBOUNDED_MARK_BUDGET};
pub use strategy::{DictionaryPlan, DictionaryVariant, Strategy, StrategyKind};
