//! Error types for ChipForge

use thiserror::Error;

/// Main error type for ChipForge operations
#[derive(Debug, Error)]
pub enum ChipForgeError {
    /// Input rejected before any job was created
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid operation for current controller state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Reading or writing a persisted artifact failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for ChipForge operations
pub type Result<T> = std::result::Result<T, ChipForgeError>;
