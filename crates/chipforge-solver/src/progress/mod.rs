//! Progress tracking: ETA estimation and the presentation-side result view.

mod tracker;
mod view;
mod window;

pub use tracker::{Eta, ProgressTracker};
pub use view::ResultView;
pub use window::{DeltaWindow, ETA_WINDOW};

#[cfg(test)]
mod tests;
