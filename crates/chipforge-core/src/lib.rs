//! ChipForge Core - Core types and traits for chip assignment jobs
//!
//! This crate provides the fundamental abstractions for ChipForge:
//! - Board, chip and settings value types
//! - Strategy and job descriptor types
//! - Progress and result snapshot types
//! - Catalog traits for board geometry and preset availability

pub mod domain;
pub mod error;

pub use domain::{
    BoardCatalog, BoardCombination, BoardRef, CandidateSet, CellType, Chip, Color,
    DictionaryPlan, DictionaryVariant, JobDescriptor, JobId, JobState, PresetCatalog,
    ProgressSample, ResultSnapshot, SettingsSnapshot, Strategy, StrategyKind,
};
pub use error::{ChipForgeError, Result};
