//! Candidate sets.

use std::ops::Deref;
use std::sync::Arc;

use super::Chip;

/// Ordered, immutable set of chip copies selected for one job.
///
/// Built from owned chips, so nothing in the set aliases the inventory.
/// Cloning a `CandidateSet` shares the same backing storage.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::{CandidateSet, CellType, Chip, Color};
///
/// let inventory = vec![Chip::new(CellType::new(6).unwrap(), Color::Blue, 5)];
/// let candidates: CandidateSet = inventory.iter().cloned().collect();
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0], inventory[0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateSet {
    chips: Arc<[Chip]>,
}

impl CandidateSet {
    pub fn new(chips: Vec<Chip>) -> Self {
        Self {
            chips: chips.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn as_slice(&self) -> &[Chip] {
        &self.chips
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for CandidateSet {
    type Target = [Chip];

    fn deref(&self) -> &[Chip] {
        &self.chips
    }
}

impl FromIterator<Chip> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Chip>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
