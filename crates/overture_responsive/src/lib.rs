//! Overture Responsive
//!
//! Viewport-driven configuration for load choreography:
//!
//! - **MediaRegistry**: width conditions mapped to callbacks, dispatched on
//!   the transition into matching
//! - **Performance policy**: lag smoothing tuned to viewport width
//! - **ScrollResetGuard**: teardown hook that puts the next visit back at
//!   the top of the page

pub mod media;
pub mod policy;
pub mod scroll;

pub use media::{MatchFn, MediaCondition, MediaEntryId, MediaRegistry};
pub use policy::{lag_smoothing_for_width, MOBILE_MAX_WIDTH};
pub use scroll::ScrollResetGuard;
