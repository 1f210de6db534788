//! Overture Core
//!
//! Foundational contracts for the Overture load-choreography toolkit:
//!
//! - **Sequence**: pausable, resumable ordered sequences shared between their
//!   constructor and the collaborator that gates them
//! - **ProgressSink**: the display target that renders a counter for the user
//! - **Ticker**: cancellable repeating-tick registration, with
//!   [`ManualTicker`] as a deterministic host-pumped driver
//! - **LagSmoothing**: bounded catch-up for stalled host loops
//!
//! Everything here is dependency-injected: components receive their tick
//! facility and sequence handles as explicit arguments and never reach into
//! ambient globals, so each piece is independently testable.

pub mod error;
pub mod sequence;
pub mod sink;
pub mod ticker;

pub use error::{CoreError, Result};
pub use sequence::{lock_sequence, share, Sequence, SharedSequence};
pub use sink::ProgressSink;
pub use ticker::{LagSmoothing, ManualTicker, TickDirective, TickFn, TickTaskId, Ticker};
