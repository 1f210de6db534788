//! Overture Loader
//!
//! The progress-gated sequencer: a loading counter that advances 0 to target
//! on a repeating tick, paints every value to a display sink, and holds a
//! dependent sequence paused until the final value has observably painted.
//! Release is decided by tick delivery order, never by wall-clock elapsed
//! time - a slow device delays the release instead of racing past it.

pub mod error;
pub mod gate;

pub use error::{GateError, Result};
pub use gate::{GateState, ProgressGate};
