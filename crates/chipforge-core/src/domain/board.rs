//! Board identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChipForgeError, Result};

/// Lowest star level a board can have.
pub const MIN_BOARD_STAR: u8 = 1;

/// Highest star level a board can have.
pub const MAX_BOARD_STAR: u8 = 5;

/// Identity of the target board: its name and star level.
///
/// A `BoardRef` is immutable once a job starts; the controller clones it
/// into the job descriptor.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::BoardRef;
///
/// let board = BoardRef::new("Alpha", 5).unwrap();
/// assert_eq!(board.name(), "Alpha");
/// assert_eq!(board.star(), 5);
/// assert!(BoardRef::new("Alpha", 6).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoardRef", into = "RawBoardRef")]
pub struct BoardRef {
    name: String,
    star: u8,
}

impl BoardRef {
    /// Creates a board reference, rejecting star levels outside `1..=5`.
    pub fn new(name: impl Into<String>, star: u8) -> Result<Self> {
        if !(MIN_BOARD_STAR..=MAX_BOARD_STAR).contains(&star) {
            return Err(ChipForgeError::Validation(format!(
                "board star must be between {MIN_BOARD_STAR} and {MAX_BOARD_STAR}, got {star}"
            )));
        }
        Ok(Self {
            name: name.into(),
            star,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn star(&self) -> u8 {
        self.star
    }
}

impl fmt::Display for BoardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}★", self.name, self.star)
    }
}

#[derive(Serialize, Deserialize)]
struct RawBoardRef {
    name: String,
    star: u8,
}

impl TryFrom<RawBoardRef> for BoardRef {
    type Error = ChipForgeError;

    fn try_from(raw: RawBoardRef) -> Result<Self> {
        BoardRef::new(raw.name, raw.star)
    }
}

impl From<BoardRef> for RawBoardRef {
    fn from(board: BoardRef) -> Self {
        Self {
            name: board.name,
            star: board.star,
        }
    }
}
