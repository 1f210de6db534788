//! Overture Timeline
//!
//! Ordered, pausable callback-step timelines. A [`Timeline`] is the concrete
//! collaborator a loading gate holds paused: steps are positioned on a local
//! time axis, the playhead advances only while playing, and pause/resume
//! freeze and continue it in place without skipping or replaying steps.

pub mod timeline;

pub use timeline::{StepFn, Timeline, TimelineEntryId};
