//! Candidate filtering.
//!
//! Turns the live inventory into the immutable [`CandidateSet`] a job runs
//! on. Both functions are pure: they read the inventory and return owned
//! data, never touching the source chips.

use chipforge_core::domain::{
    BoardCatalog, BoardRef, CandidateSet, CellType, Chip, SettingsSnapshot,
};
use tracing::debug;

/// Returns the index of the first chip whose point allocation is invalid.
pub fn validate_inventory(inventory: &[Chip]) -> Option<usize> {
    inventory.iter().position(|chip| !chip.is_points_valid())
}

/// Selects and deep-copies the chips eligible for a job.
///
/// A chip passes when all four rules hold:
/// - colour: colour matching is off, or the chip matches the board colour
/// - size: there is no size floor, or the chip is at least the floor
/// - negative mark: the minimum mark budget is zero, or the chip is marked
/// - positive mark: the maximum mark budget exceeds the board's cell
///   count, or the chip is marked
///
/// Inventory order is preserved. With `force_max_level` every copy is
/// raised to the maximum level. An empty result is valid.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::{Color, SettingsSnapshot};
/// use chipforge_solver::filter::filter_candidates;
/// use chipforge_test::catalog::StaticCatalog;
/// use chipforge_test::chips::{alpha_board, cell, valid_chip};
///
/// let catalog = StaticCatalog::new().with_board("Alpha", Color::Orange, 36);
/// let inventory = vec![
///     valid_chip("6", Color::Orange),
///     valid_chip("6", Color::Blue),
///     valid_chip("4", Color::Orange),
/// ];
///
/// let candidates = filter_candidates(
///     &inventory,
///     &alpha_board(),
///     &catalog,
///     &SettingsSnapshot::default(),
///     Some(cell("5A")),
/// );
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].level(), 20);
/// ```
pub fn filter_candidates(
    inventory: &[Chip],
    board: &BoardRef,
    catalog: &dyn BoardCatalog,
    settings: &SettingsSnapshot,
    size_floor: Option<CellType>,
) -> CandidateSet {
    let board_color = catalog.board_color(board.name());
    let cell_count = catalog.cell_count(board);

    let candidates: CandidateSet = inventory
        .iter()
        .filter(|chip| {
            let color_match = !settings.match_color || chip.color() == board_color;
            let size_match = size_floor.map_or(true, |floor| chip.type_geq(floor));
            let mark_match_neg = settings.mark_min == 0 || chip.is_marked();
            let mark_match_pos = settings.mark_max > cell_count || chip.is_marked();
            color_match && size_match && mark_match_neg && mark_match_pos
        })
        .map(|chip| {
            if settings.force_max_level {
                chip.with_max_level()
            } else {
                chip.clone()
            }
        })
        .collect();

    debug!(
        board = %board,
        inventory = inventory.len(),
        candidates = candidates.len(),
        size_floor = ?size_floor.map(|t| t.to_string()),
        "filtered candidates"
    );

    candidates
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
