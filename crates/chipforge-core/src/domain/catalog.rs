//! Read-only knowledge about boards and precomputed presets.
//!
//! Both catalogs are owned outside the job controller. They are consulted
//! while a job is being prepared and never during the search itself.

use super::{BoardRef, CellType, Color, DictionaryVariant};

/// Static board geometry and colour.
pub trait BoardCatalog: Send + Sync {
    /// Elemental colour of the named board.
    fn board_color(&self, name: &str) -> Color;

    /// Total number of cells on the board at the given star level.
    fn cell_count(&self, board: &BoardRef) -> u32;
}

/// Availability of precomputed dictionaries and presets.
pub trait PresetCatalog: Send + Sync {
    /// Returns true if the board has a dictionary covering only some
    /// size classes, offered as two variants.
    fn has_partial(&self, board: &BoardRef) -> bool;

    /// Smallest size class the dictionary for `variant` supports, or
    /// `None` if the board has no dictionary.
    fn min_type(&self, board: &BoardRef, variant: DictionaryVariant) -> Option<CellType>;

    /// Returns true if a precomputed preset exists for this board and variant.
    fn preset_exists(&self, board: &BoardRef, variant: DictionaryVariant) -> bool;

    /// Returns true if the general fallback search has a preset to work
    /// from for this board.
    fn has_any_preset(&self, board: &BoardRef) -> bool;
}
