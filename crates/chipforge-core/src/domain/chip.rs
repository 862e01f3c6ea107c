//! Inventory chips.
//!
//! Chips are owned by the inventory. Job code only ever works on clones, so
//! every type here is a plain value type.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChipForgeError, Result};

/// Maximum enhancement level of a chip.
pub const MAX_CHIP_LEVEL: u8 = 20;

/// Largest number of cells a chip can occupy.
pub const MAX_CHIP_CELLS: u8 = 6;

/// Size class of a chip: cell count plus shape subtype.
///
/// Ordered by cell count first, then by subtype letter, so
/// `5A < 5B < 6`. Chips without a subtype sort before lettered shapes of
/// the same size.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::CellType;
///
/// let five_b: CellType = "5B".parse().unwrap();
/// let six: CellType = "6".parse().unwrap();
/// assert!(six > five_b);
/// assert!(CellType::with_subtype(5, 'A').unwrap() < five_b);
/// assert_eq!(five_b.to_string(), "5B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellType {
    cells: u8,
    subtype: Option<char>,
}

impl CellType {
    /// A size class without a shape subtype.
    pub fn new(cells: u8) -> Result<Self> {
        Self::check_cells(cells)?;
        Ok(Self {
            cells,
            subtype: None,
        })
    }

    /// A size class with a shape subtype letter (`'A'`, `'B'`, ...).
    pub fn with_subtype(cells: u8, subtype: char) -> Result<Self> {
        Self::check_cells(cells)?;
        if !subtype.is_ascii_alphabetic() {
            return Err(ChipForgeError::Validation(format!(
                "cell subtype must be a letter, got {subtype:?}"
            )));
        }
        Ok(Self {
            cells,
            subtype: Some(subtype.to_ascii_uppercase()),
        })
    }

    fn check_cells(cells: u8) -> Result<()> {
        if cells == 0 || cells > MAX_CHIP_CELLS {
            return Err(ChipForgeError::Validation(format!(
                "chip cell count must be between 1 and {MAX_CHIP_CELLS}, got {cells}"
            )));
        }
        Ok(())
    }

    pub fn cells(&self) -> u8 {
        self.cells
    }

    pub fn subtype(&self) -> Option<char> {
        self.subtype
    }
}

impl Ord for CellType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cells
            .cmp(&other.cells)
            .then_with(|| self.subtype.cmp(&other.subtype))
    }
}

impl PartialOrd for CellType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtype {
            Some(subtype) => write!(f, "{}{}", self.cells, subtype),
            None => write!(f, "{}", self.cells),
        }
    }
}

impl std::str::FromStr for CellType {
    type Err = ChipForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ChipForgeError::Validation(format!("invalid cell type: {s:?}"));
        let mut chars = s.trim().chars();
        let cells = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)? as u8;
        match (chars.next(), chars.next()) {
            (None, _) => CellType::new(cells),
            (Some(subtype), None) => CellType::with_subtype(cells, subtype),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for CellType {
    type Error = ChipForgeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CellType> for String {
    fn from(cell_type: CellType) -> Self {
        cell_type.to_string()
    }
}

/// Chip colour. Boards have an elemental colour that chips may be required
/// to match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    None,
    Orange,
    Blue,
}

/// Point allocation across the four stat channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatPoints {
    pub damage: u8,
    pub breach: u8,
    pub hit: u8,
    pub reload: u8,
}

impl StatPoints {
    pub fn new(damage: u8, breach: u8, hit: u8, reload: u8) -> Self {
        Self {
            damage,
            breach,
            hit,
            reload,
        }
    }

    /// Sum of all four channels.
    pub fn total(&self) -> u32 {
        u32::from(self.damage)
            + u32::from(self.breach)
            + u32::from(self.hit)
            + u32::from(self.reload)
    }
}

/// An inventory chip.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::{CellType, Chip, Color, StatPoints};
///
/// let chip = Chip::new(CellType::new(4).unwrap(), Color::Orange, 5)
///     .with_points(StatPoints::new(1, 1, 1, 1))
///     .with_level(3);
/// assert!(chip.is_points_valid());
///
/// let maxed = chip.with_max_level();
/// assert_eq!(maxed.level(), 20);
/// assert_eq!(chip.level(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chip {
    cell_type: CellType,
    color: Color,
    star: u8,
    points: StatPoints,
    marked: bool,
    level: u8,
}

impl Chip {
    /// Creates an unmarked level-0 chip with no points allocated.
    pub fn new(cell_type: CellType, color: Color, star: u8) -> Self {
        Self {
            cell_type,
            color,
            star,
            points: StatPoints::default(),
            marked: false,
            level: 0,
        }
    }

    pub fn with_points(mut self, points: StatPoints) -> Self {
        self.points = points;
        self
    }

    pub fn with_marked(mut self, marked: bool) -> Self {
        self.marked = marked;
        self
    }

    /// Sets the level, clamped to [`MAX_CHIP_LEVEL`].
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.min(MAX_CHIP_LEVEL);
        self
    }

    /// Returns a copy raised to the maximum level.
    pub fn with_max_level(&self) -> Self {
        self.clone().with_level(MAX_CHIP_LEVEL)
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn star(&self) -> u8 {
        self.star
    }

    pub fn points(&self) -> StatPoints {
        self.points
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Points this chip is expected to distribute: one per cell.
    pub fn point_budget(&self) -> u32 {
        u32::from(self.cell_type.cells())
    }

    /// Returns true if the allocated points exactly use the point budget.
    pub fn is_points_valid(&self) -> bool {
        self.points.total() == self.point_budget()
    }

    /// Returns true if this chip's size class is at least `floor`.
    pub fn type_geq(&self, floor: CellType) -> bool {
        self.cell_type >= floor
    }
}
