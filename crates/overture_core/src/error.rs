//! Error types shared across Overture components

use thiserror::Error;

/// Errors raised while driving load choreography
#[derive(Error, Debug)]
pub enum CoreError {
    /// Display sink rejected a progress write
    #[error("Display sink failed: {0}")]
    Sink(String),

    /// Shared sequence could not be driven
    #[error("Sequence unavailable: {0}")]
    Sequence(String),

    /// A scheduled tick task failed
    #[error("Tick task failed: {0}")]
    Tick(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
