//! Progress samples and discovered results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One progress tick reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSample {
    /// Clock reading when the sample was taken, in milliseconds.
    pub timestamp_millis: u64,
    /// Search-space units enumerated so far.
    pub enumerated: u64,
    /// Estimated total units in the search space.
    pub total_estimate: u64,
    /// Combinations found so far.
    pub found: u64,
}

impl ProgressSample {
    /// Units still to enumerate.
    pub fn remaining(&self) -> u64 {
        self.total_estimate.saturating_sub(self.enumerated)
    }
}

/// Where one candidate chip sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Index into the job's candidate set.
    pub candidate: usize,
    /// Quarter turns applied to the chip.
    pub rotation: u8,
    pub row: u8,
    pub col: u8,
}

/// One board arrangement discovered by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCombination {
    pub placements: Vec<Placement>,
}

impl BoardCombination {
    pub fn new(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    pub fn chip_count(&self) -> usize {
        self.placements.len()
    }
}

/// Mid-search visualization hint. Best effort; may be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewArtifact {
    pub board: BoardCombination,
}

/// Immutable, versioned view of the results discovered so far.
///
/// The revision increases by one per published combination; entries are
/// never removed or reordered within a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSnapshot {
    revision: u64,
    boards: Arc<Vec<BoardCombination>>,
}

impl ResultSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot holding `boards`, versioned by their count.
    pub fn from_boards(boards: Vec<BoardCombination>) -> Self {
        Self {
            revision: boards.len() as u64,
            boards: Arc::new(boards),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn boards(&self) -> &[BoardCombination] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Appends one combination and bumps the revision.
    ///
    /// Copies the backing list only if another snapshot still shares it.
    pub fn push(&mut self, board: BoardCombination) {
        Arc::make_mut(&mut self.boards).push(board);
        self.revision += 1;
    }
}
