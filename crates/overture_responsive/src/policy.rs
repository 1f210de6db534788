//! Width-based performance policy
//!
//! Small devices stutter under load choreography more than desktops do, so
//! below the handheld cutover the ticker gets a tolerant lag smoothing
//! policy: a stalled frame is treated as a single 16ms step instead of a
//! burst of catch-up ticks. Larger viewports run with smoothing disabled.

use overture_core::LagSmoothing;
use std::time::Duration;

/// Widths below this are treated as handheld.
pub const MOBILE_MAX_WIDTH: u32 = 768;

const STALL_THRESHOLD: Duration = Duration::from_millis(1000);
const ADJUSTED_LAG: Duration = Duration::from_millis(16);

/// Lag smoothing policy for a viewport width.
///
/// `None` means clamping is disabled and every frame delta passes through.
pub fn lag_smoothing_for_width(width: u32) -> Option<LagSmoothing> {
    if width < MOBILE_MAX_WIDTH {
        Some(LagSmoothing::new(STALL_THRESHOLD, ADJUSTED_LAG))
    } else {
        None
    }
}
