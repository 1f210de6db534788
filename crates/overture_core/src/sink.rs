//! Progress display sink
//!
//! The destination that renders a counter's current value for the end user.
//! Write-only from the producer's perspective; there is no invariant on prior
//! contents and no format negotiation.

use crate::error::Result;

/// Receives each counter value as it is produced, once per tick.
///
/// A failed write must surface to the producer - a swallowed failure could
/// leave a gated sequence paused forever with nothing left to release it.
pub trait ProgressSink: Send {
    /// Present `value` to the user.
    fn write(&mut self, value: u32) -> Result<()>;
}

/// Any `FnMut(u32)` closure is an infallible sink.
impl<F> ProgressSink for F
where
    F: FnMut(u32) + Send,
{
    fn write(&mut self, value: u32) -> Result<()> {
        self(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_is_a_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let mut sink = move |value: u32| log.lock().unwrap().push(value);

        let sink: &mut dyn ProgressSink = &mut sink;
        sink.write(0).unwrap();
        sink.write(1).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
    }
}
