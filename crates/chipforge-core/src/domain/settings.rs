//! Settings captured when a job starts.

use serde::{Deserialize, Serialize};

/// Marked-cell budgets at or above this value never restrict a board.
pub const UNBOUNDED_MARK_BUDGET: u32 = 64;

/// What the mark budgets count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkType {
    /// Budgets count marked board cells.
    #[default]
    Cell,
    /// Budgets count marked chips.
    Chip,
}

/// Ordering applied to discovered combinations by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    #[default]
    Ticket,
    Xp,
    Symmetry,
}

/// Value snapshot of the user settings that influence a job.
///
/// The controller copies the live settings into the job descriptor, so
/// edits made while a job runs never reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SettingsSnapshot {
    /// Only keep chips whose colour matches the board.
    pub match_color: bool,

    /// Raise every candidate to the maximum level.
    pub force_max_level: bool,

    /// Let the engine rotate chips.
    pub allow_rotation: bool,

    /// Minimum marked-cell budget.
    pub mark_min: u32,

    /// Maximum marked-cell budget.
    pub mark_max: u32,

    pub mark_type: MarkType,

    pub sort_type: SortType,

    /// Forward preview artifacts from the engine while running.
    pub show_progress_image: bool,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            match_color: true,
            force_max_level: true,
            allow_rotation: true,
            mark_min: 0,
            mark_max: UNBOUNDED_MARK_BUDGET,
            mark_type: MarkType::Cell,
            sort_type: SortType::Ticket,
            show_progress_image: true,
        }
    }
}
