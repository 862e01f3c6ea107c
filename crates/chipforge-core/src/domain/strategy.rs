//! Solving strategies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BoardRef, CellType, PresetCatalog};

/// Which precomputed dictionary to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryVariant {
    /// Variant 0: the fast, smaller subset.
    Subset,
    /// Variant 1: the larger subset.
    Extended,
}

impl DictionaryVariant {
    /// Numeric index of the variant (0 or 1).
    pub fn index(self) -> u8 {
        match self {
            DictionaryVariant::Subset => 0,
            DictionaryVariant::Extended => 1,
        }
    }
}

impl fmt::Display for DictionaryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A dictionary strategy that has been checked against the preset catalog.
///
/// The only way to obtain one is [`DictionaryPlan::verify`], which fails
/// when no preset exists for the board and variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryPlan {
    variant: DictionaryVariant,
    min_type: Option<CellType>,
}

impl DictionaryPlan {
    /// Builds a plan if `catalog` has a preset for `(board, variant)`.
    pub fn verify(
        board: &BoardRef,
        variant: DictionaryVariant,
        catalog: &dyn PresetCatalog,
    ) -> Option<Self> {
        if !catalog.preset_exists(board, variant) {
            return None;
        }
        Some(Self {
            variant,
            min_type: catalog.min_type(board, variant),
        })
    }

    pub fn variant(&self) -> DictionaryVariant {
        self.variant
    }

    /// Smallest chip size class the dictionary supports.
    pub fn min_type(&self) -> Option<CellType> {
        self.min_type
    }
}

/// Solving strategy for one job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Precomputed dictionary lookup.
    Dictionary(DictionaryPlan),
    /// General search over all size classes.
    Fallback,
}

impl Strategy {
    /// Size floor candidates must meet, if any.
    pub fn size_floor(&self) -> Option<CellType> {
        match self {
            Strategy::Dictionary(plan) => plan.min_type(),
            Strategy::Fallback => None,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Dictionary(plan) => StrategyKind::Dictionary {
                variant: plan.variant(),
            },
            Strategy::Fallback => StrategyKind::Fallback,
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Strategy::Dictionary(_))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

/// Unverified description of a strategy, as stored in job records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    Dictionary { variant: DictionaryVariant },
    Fallback,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Dictionary { variant } => write!(f, "dictionary({variant})"),
            StrategyKind::Fallback => write!(f, "fallback"),
        }
    }
}
