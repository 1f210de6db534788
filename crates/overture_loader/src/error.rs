//! Error types for overture_loader

use crate::gate::GateState;
use overture_core::CoreError;
use thiserror::Error;

/// Errors that can occur while driving a progress gate
#[derive(Error, Debug)]
pub enum GateError {
    /// `start()` called with a zero target
    #[error("Progress target must be greater than zero")]
    ZeroTarget,

    /// `start()` called with a zero tick interval
    #[error("Tick interval must be greater than zero")]
    ZeroInterval,

    /// `start()` called on a gate that is not idle
    #[error("Gate already started (state: {0:?})")]
    AlreadyStarted(GateState),

    /// Gate state lock poisoned by a panicking holder
    #[error("Gate state poisoned")]
    Poisoned,

    /// Failure from the display sink or the gated sequence
    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Result type for progress gate operations
pub type Result<T> = std::result::Result<T, GateError>;
