//! Strategy selection.
//!
//! Chooses between a precomputed dictionary and the general fallback
//! search. The user is consulted through a [`ChoiceProvider`] whenever the
//! choice would change which chips take part.

mod prompt;
mod selector;

pub use prompt::{ChoiceProvider, StrategyOption, StrategyPrompt};
pub use selector::{select_strategy, AbortReason, StrategyDecision};
