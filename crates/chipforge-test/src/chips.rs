//! Chip and inventory fixtures.
//!
//! Chips built here have a valid point allocation unless the helper says
//! otherwise.
//!
//! # Example
//!
//! ```
//! use chipforge_core::domain::Color;
//! use chipforge_test::chips::{inventory, invalid_chip, valid_chip};
//!
//! let chips = inventory(&["6", "5B", "4"], Color::Orange);
//! assert_eq!(chips.len(), 3);
//! assert!(chips.iter().all(|c| c.is_points_valid()));
//! assert!(!invalid_chip("5A", Color::Blue).is_points_valid());
//! assert!(valid_chip("5A", Color::Blue).is_points_valid());
//! ```

use chipforge_core::domain::{BoardRef, CellType, Chip, Color, StatPoints};

/// The five-star "Alpha" board used throughout the tests.
pub fn alpha_board() -> BoardRef {
    BoardRef::new("Alpha", 5).expect("valid board")
}

/// Parses a cell type such as `"5B"` or `"6"`.
pub fn cell(cell_type: &str) -> CellType {
    cell_type.parse().expect("valid cell type")
}

/// Spreads `budget` points over the four channels, damage first.
fn spread(budget: u8) -> StatPoints {
    let share = budget / 4;
    let extra = budget % 4;
    StatPoints::new(
        share + u8::from(extra > 0),
        share + u8::from(extra > 1),
        share + u8::from(extra > 2),
        share,
    )
}

/// A five-star, level-0 chip whose points exactly use its budget.
pub fn valid_chip(cell_type: &str, color: Color) -> Chip {
    let cell_type = cell(cell_type);
    Chip::new(cell_type, color, 5).with_points(spread(cell_type.cells()))
}

/// A chip with one point more than its budget allows.
pub fn invalid_chip(cell_type: &str, color: Color) -> Chip {
    let cell_type = cell(cell_type);
    Chip::new(cell_type, color, 5).with_points(spread(cell_type.cells() + 1))
}

/// A valid, marked chip.
pub fn marked_chip(cell_type: &str, color: Color) -> Chip {
    valid_chip(cell_type, color).with_marked(true)
}

/// One valid chip per entry in `cell_types`, all of the same colour.
pub fn inventory(cell_types: &[&str], color: Color) -> Vec<Chip> {
    cell_types.iter().map(|t| valid_chip(t, color)).collect()
}
