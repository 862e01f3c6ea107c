//! In-memory board and preset catalog.
//!
//! # Example
//!
//! ```
//! use chipforge_core::domain::{BoardCatalog, Color, DictionaryVariant, PresetCatalog};
//! use chipforge_test::catalog::StaticCatalog;
//! use chipforge_test::chips::{alpha_board, cell};
//!
//! let catalog = StaticCatalog::new()
//!     .with_board("Alpha", Color::Orange, 36)
//!     .with_dictionary("Alpha", 5, DictionaryVariant::Subset, cell("5B"));
//!
//! let board = alpha_board();
//! assert_eq!(catalog.board_color("Alpha"), Color::Orange);
//! assert_eq!(catalog.cell_count(&board), 36);
//! assert!(catalog.preset_exists(&board, DictionaryVariant::Subset));
//! assert!(catalog.has_any_preset(&board));
//! assert!(!catalog.has_partial(&board));
//! ```

use std::collections::{HashMap, HashSet};

use chipforge_core::domain::{
    BoardCatalog, BoardRef, CellType, Color, DictionaryVariant, PresetCatalog,
};

type BoardKey = (String, u8);

/// Catalog backed by hash maps, filled through builder methods.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    colors: HashMap<String, Color>,
    cell_counts: HashMap<String, u32>,
    partial: HashSet<BoardKey>,
    dictionaries: HashMap<(String, u8, DictionaryVariant), CellType>,
    missing_presets: HashSet<(String, u8, DictionaryVariant)>,
    fallback_presets: HashSet<BoardKey>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a board's colour and cell count (for every star level).
    pub fn with_board(mut self, name: &str, color: Color, cell_count: u32) -> Self {
        self.colors.insert(name.to_string(), color);
        self.cell_counts.insert(name.to_string(), cell_count);
        self
    }

    /// Registers a dictionary with a matching preset. Also makes the
    /// fallback search available for the board.
    pub fn with_dictionary(
        mut self,
        name: &str,
        star: u8,
        variant: DictionaryVariant,
        min_type: CellType,
    ) -> Self {
        self.dictionaries
            .insert((name.to_string(), star, variant), min_type);
        self.fallback_presets.insert((name.to_string(), star));
        self
    }

    /// Registers both dictionary variants and flags the board as partial.
    pub fn with_partial_dictionary(
        self,
        name: &str,
        star: u8,
        subset_min: CellType,
        extended_min: CellType,
    ) -> Self {
        let mut catalog = self
            .with_dictionary(name, star, DictionaryVariant::Subset, subset_min)
            .with_dictionary(name, star, DictionaryVariant::Extended, extended_min);
        catalog.partial.insert((name.to_string(), star));
        catalog
    }

    /// Keeps the dictionary's size information but removes its preset.
    pub fn without_preset(mut self, name: &str, star: u8, variant: DictionaryVariant) -> Self {
        self.missing_presets
            .insert((name.to_string(), star, variant));
        self
    }

    /// Makes the fallback search available without any dictionary.
    pub fn with_fallback_preset(mut self, name: &str, star: u8) -> Self {
        self.fallback_presets.insert((name.to_string(), star));
        self
    }

    /// Removes the fallback preset for a board.
    pub fn without_fallback_preset(mut self, name: &str, star: u8) -> Self {
        self.fallback_presets.remove(&(name.to_string(), star));
        self
    }

    fn key(board: &BoardRef, variant: DictionaryVariant) -> (String, u8, DictionaryVariant) {
        (board.name().to_string(), board.star(), variant)
    }
}

impl BoardCatalog for StaticCatalog {
    fn board_color(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or_default()
    }

    fn cell_count(&self, board: &BoardRef) -> u32 {
        self.cell_counts.get(board.name()).copied().unwrap_or(0)
    }
}

impl PresetCatalog for StaticCatalog {
    fn has_partial(&self, board: &BoardRef) -> bool {
        self.partial
            .contains(&(board.name().to_string(), board.star()))
    }

    fn min_type(&self, board: &BoardRef, variant: DictionaryVariant) -> Option<CellType> {
        self.dictionaries.get(&Self::key(board, variant)).copied()
    }

    fn preset_exists(&self, board: &BoardRef, variant: DictionaryVariant) -> bool {
        let key = Self::key(board, variant);
        self.dictionaries.contains_key(&key) && !self.missing_presets.contains(&key)
    }

    fn has_any_preset(&self, board: &BoardRef) -> bool {
        self.fallback_presets
            .contains(&(board.name().to_string(), board.star()))
    }
}
