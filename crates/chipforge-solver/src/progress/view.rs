//! Presentation-side copy of the result list.

use chipforge_core::domain::{BoardCombination, ResultSnapshot};

/// A result snapshot plus the user's selection in it.
///
/// Syncing to a newer snapshot keeps the selected combination selected if
/// an equal one is still present.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::{BoardCombination, Placement, ResultSnapshot};
/// use chipforge_solver::progress::ResultView;
///
/// let combo = |col| BoardCombination::new(vec![Placement { candidate: 0, rotation: 0, row: 0, col }]);
///
/// let mut view = ResultView::new();
/// view.sync(ResultSnapshot::from_boards(vec![combo(0), combo(1)]));
/// assert!(view.select(1));
///
/// view.sync(ResultSnapshot::from_boards(vec![combo(2), combo(0), combo(1)]));
/// assert_eq!(view.selected_index(), Some(2));
/// assert_eq!(view.selected_board(), Some(&combo(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    snapshot: ResultSnapshot,
    selected: Option<usize>,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held snapshot, carrying the selection over by value.
    pub fn sync(&mut self, snapshot: ResultSnapshot) {
        let previous = self.selected_board().cloned();
        self.snapshot = snapshot;
        self.selected = previous.and_then(|board| {
            self.snapshot
                .boards()
                .iter()
                .position(|candidate| *candidate == board)
        });
    }

    /// Selects the combination at `index`. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.snapshot.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_board(&self) -> Option<&BoardCombination> {
        self.selected.and_then(|i| self.snapshot.boards().get(i))
    }

    pub fn boards(&self) -> &[BoardCombination] {
        self.snapshot.boards()
    }

    pub fn revision(&self) -> u64 {
        self.snapshot.revision()
    }
}
