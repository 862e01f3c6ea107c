//! Shared test fixtures for ChipForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It only depends on `chipforge-core`, so any crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`chips`] - Chip and inventory builders
//! - [`catalog`] - In-memory board and preset catalog
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! chipforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use chipforge_test::chips::{valid_chip, inventory};
//! use chipforge_test::catalog::StaticCatalog;
//! ```

pub mod catalog;
pub mod chips;

// Re-export commonly used types at crate root for convenience
pub use catalog::StaticCatalog;
pub use chips::{alpha_board, inventory, invalid_chip, valid_chip};
