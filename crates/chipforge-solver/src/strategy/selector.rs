//! The strategy decision procedure.

use std::fmt;

use chipforge_core::domain::{
    BoardRef, Chip, DictionaryPlan, DictionaryVariant, PresetCatalog, Strategy,
};
use tracing::{debug, info};

use super::prompt::{ChoiceProvider, StrategyOption, StrategyPrompt};

/// Why no strategy was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// The user cancelled a prompt.
    Cancelled,
    /// Neither a dictionary nor the fallback search has a preset.
    NoUsablePreset,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Cancelled => f.write_str("cancelled by user"),
            AbortReason::NoUsablePreset => f.write_str("no usable preset for board"),
        }
    }
}

/// Outcome of [`select_strategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyDecision {
    Selected(Strategy),
    Aborted(AbortReason),
}

impl StrategyDecision {
    pub fn strategy(&self) -> Option<&Strategy> {
        match self {
            StrategyDecision::Selected(strategy) => Some(strategy),
            StrategyDecision::Aborted(_) => None,
        }
    }
}

/// Strategy the user asked for, before preset verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requested {
    Dictionary(DictionaryVariant),
    Fallback,
}

/// Picks the strategy for a job on `board`.
///
/// With a partial dictionary the user always chooses between both
/// dictionary variants and the fallback. Otherwise the dictionary's
/// minimum size decides: if every chip in `inventory` meets it, variant 0
/// is used without asking; if not, the user chooses between dropping the
/// undersized chips and the fallback. Boards with no dictionary go
/// straight to the fallback.
///
/// A dictionary without a preset is downgraded to the fallback, and a
/// fallback without any preset aborts.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::{Color, DictionaryVariant};
/// use chipforge_solver::strategy::{select_strategy, StrategyOption, StrategyPrompt};
/// use chipforge_test::catalog::StaticCatalog;
/// use chipforge_test::chips::{alpha_board, cell, inventory};
///
/// let catalog = StaticCatalog::new()
///     .with_dictionary("Alpha", 5, DictionaryVariant::Subset, cell("4"));
/// let chips = inventory(&["4", "5A", "6"], Color::Orange);
///
/// let mut never_asked = |_: &StrategyPrompt| -> Option<StrategyOption> {
///     panic!("no prompt expected")
/// };
/// let decision = select_strategy(&alpha_board(), &chips, &catalog, &mut never_asked);
///
/// let strategy = decision.strategy().unwrap();
/// assert!(strategy.is_dictionary());
/// assert_eq!(strategy.size_floor(), Some(cell("4")));
/// ```
pub fn select_strategy(
    board: &BoardRef,
    inventory: &[Chip],
    catalog: &dyn PresetCatalog,
    choices: &mut dyn ChoiceProvider,
) -> StrategyDecision {
    let requested = if catalog.has_partial(board) {
        match ask(choices, StrategyPrompt::PartialDictionary) {
            Some(StrategyOption::DictionarySubset) => {
                Requested::Dictionary(DictionaryVariant::Subset)
            }
            Some(StrategyOption::DictionaryExtended) => {
                Requested::Dictionary(DictionaryVariant::Extended)
            }
            Some(_) => Requested::Fallback,
            None => return StrategyDecision::Aborted(AbortReason::Cancelled),
        }
    } else {
        match catalog.min_type(board, DictionaryVariant::Subset) {
            None => {
                debug!(board = %board, "no dictionary for board, using fallback");
                Requested::Fallback
            }
            Some(min_type) => {
                let undersized = inventory
                    .iter()
                    .filter(|chip| !chip.type_geq(min_type))
                    .count();
                if undersized == 0 {
                    Requested::Dictionary(DictionaryVariant::Subset)
                } else {
                    let prompt = StrategyPrompt::UndersizedChips {
                        min_type,
                        undersized,
                    };
                    match ask(choices, prompt) {
                        Some(StrategyOption::DictionaryExcludingUndersized) => {
                            Requested::Dictionary(DictionaryVariant::Subset)
                        }
                        Some(_) => Requested::Fallback,
                        None => return StrategyDecision::Aborted(AbortReason::Cancelled),
                    }
                }
            }
        }
    };

    resolve(board, requested, catalog)
}

/// Puts `prompt` to the provider; options the prompt did not offer count
/// as cancel.
fn ask(choices: &mut dyn ChoiceProvider, prompt: StrategyPrompt) -> Option<StrategyOption> {
    let answer = choices.choose(&prompt)?;
    if prompt.offers(answer) {
        Some(answer)
    } else {
        debug!(?prompt, ?answer, "answer not offered by prompt, treating as cancel");
        None
    }
}

fn resolve(
    board: &BoardRef,
    requested: Requested,
    catalog: &dyn PresetCatalog,
) -> StrategyDecision {
    if let Requested::Dictionary(variant) = requested {
        if let Some(plan) = DictionaryPlan::verify(board, variant, catalog) {
            return StrategyDecision::Selected(Strategy::Dictionary(plan));
        }
        info!(
            event = "strategy_downgrade",
            board = %board,
            variant = %variant,
            "no preset for dictionary, falling back to general search"
        );
    }

    if catalog.has_any_preset(board) {
        StrategyDecision::Selected(Strategy::Fallback)
    } else {
        info!(board = %board, "no preset for fallback search");
        StrategyDecision::Aborted(AbortReason::NoUsablePreset)
    }
}
