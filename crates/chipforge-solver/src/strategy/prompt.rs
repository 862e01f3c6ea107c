//! Prompts shown to the user while picking a strategy.

use std::fmt;

use chipforge_core::domain::CellType;

/// One answer the user can give to a [`StrategyPrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyOption {
    /// Dictionary variant 0, the fast subset.
    DictionarySubset,
    /// Dictionary variant 1, the larger subset.
    DictionaryExtended,
    /// General search over every chip.
    Fallback,
    /// Dictionary variant 0, leaving out chips below its minimum size.
    DictionaryExcludingUndersized,
}

impl fmt::Display for StrategyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyOption::DictionarySubset => "dictionary (fast subset)",
            StrategyOption::DictionaryExtended => "dictionary (larger subset)",
            StrategyOption::Fallback => "general search",
            StrategyOption::DictionaryExcludingUndersized => "dictionary, excluding undersized chips",
        };
        f.write_str(label)
    }
}

/// A question put to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyPrompt {
    /// The board has a partial dictionary; pick a variant or the fallback.
    PartialDictionary,
    /// Some chips are smaller than the dictionary supports.
    UndersizedChips {
        /// Smallest size class the dictionary covers.
        min_type: CellType,
        /// Number of inventory chips below `min_type`.
        undersized: usize,
    },
}

impl StrategyPrompt {
    /// Options offered by this prompt, in display order. Cancel is always
    /// available in addition to these.
    pub fn options(&self) -> &'static [StrategyOption] {
        match self {
            StrategyPrompt::PartialDictionary => &[
                StrategyOption::DictionarySubset,
                StrategyOption::DictionaryExtended,
                StrategyOption::Fallback,
            ],
            StrategyPrompt::UndersizedChips { .. } => &[
                StrategyOption::DictionaryExcludingUndersized,
                StrategyOption::Fallback,
            ],
        }
    }

    pub fn offers(&self, option: StrategyOption) -> bool {
        self.options().contains(&option)
    }
}

/// Answers strategy prompts on behalf of the user.
///
/// Returning `None` cancels the start attempt.
///
/// Any `FnMut(&StrategyPrompt) -> Option<StrategyOption>` closure is a
/// provider:
///
/// ```
/// use chipforge_solver::strategy::{ChoiceProvider, StrategyOption, StrategyPrompt};
///
/// let mut always_fallback = |_: &StrategyPrompt| Some(StrategyOption::Fallback);
/// let choice = always_fallback.choose(&StrategyPrompt::PartialDictionary);
/// assert_eq!(choice, Some(StrategyOption::Fallback));
/// ```
pub trait ChoiceProvider {
    fn choose(&mut self, prompt: &StrategyPrompt) -> Option<StrategyOption>;
}

impl<F> ChoiceProvider for F
where
    F: FnMut(&StrategyPrompt) -> Option<StrategyOption>,
{
    fn choose(&mut self, prompt: &StrategyPrompt) -> Option<StrategyOption> {
        self(prompt)
    }
}
