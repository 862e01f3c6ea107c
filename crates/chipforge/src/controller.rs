//! Controller entry point that hides the configuration wiring.

use std::sync::Arc;

use chipforge_config::ChipForgeConfig;
use chipforge_core::domain::{BoardCatalog, PresetCatalog};
use chipforge_solver::{EngineFactory, JobController, JobControllerBuilder};

/// Configuration file read by [`controller`] from the working directory.
pub const CONFIG_FILE: &str = "chipforge.toml";

/// Builds a controller on the system clock, configured from
/// [`CONFIG_FILE`] when present and from defaults otherwise.
///
/// With the `console` feature this also installs the console logger.
pub fn controller(
    boards: Arc<dyn BoardCatalog>,
    presets: Arc<dyn PresetCatalog>,
    engines: Arc<dyn EngineFactory>,
) -> JobController {
    #[cfg(feature = "console")]
    chipforge_console::init();

    let config = ChipForgeConfig::load(CONFIG_FILE).unwrap_or_default();

    JobControllerBuilder::new(boards, presets, engines)
        .with_config(config)
        .build()
}
