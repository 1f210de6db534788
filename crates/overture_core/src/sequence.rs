//! Pausable sequence contract
//!
//! A sequence is an externally-constructed, ordered collection of steps that
//! can be halted in place and later continued from exactly where it left off.
//! Sequences are shared: the constructing caller keeps one handle (and is the
//! only party that adds steps), while a single collaborator at a time toggles
//! the pause state. That single-writer rule is a convention, not enforced
//! ownership.

use crate::error::{CoreError, Result};
use std::sync::{Arc, Mutex, MutexGuard};

/// An ordered sequence of steps that can be paused and resumed.
pub trait Sequence: Send {
    /// Halt the sequence in place. No queued step advances until [`resume`].
    ///
    /// [`resume`]: Sequence::resume
    fn pause(&mut self) -> Result<()>;

    /// Continue from exactly where [`pause`] left off.
    ///
    /// No step is skipped and no step is replayed.
    ///
    /// [`pause`]: Sequence::pause
    fn resume(&mut self) -> Result<()>;

    /// Whether the sequence is currently held paused.
    fn is_paused(&self) -> bool;
}

/// Shared handle to a sequence.
///
/// The caller that constructs the sequence keeps one clone; collaborators that
/// toggle its pause state hold another.
pub type SharedSequence = Arc<Mutex<dyn Sequence + Send>>;

/// Wrap a sequence for sharing between its constructor and a collaborator.
pub fn share<S: Sequence + 'static>(sequence: S) -> SharedSequence {
    Arc::new(Mutex::new(sequence))
}

/// Lock a shared sequence, surfacing poisoning as an error instead of a panic.
pub fn lock_sequence(sequence: &SharedSequence) -> Result<MutexGuard<'_, dyn Sequence + Send + 'static>> {
    sequence
        .lock()
        .map_err(|_| CoreError::Sequence("sequence lock poisoned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ToggleSequence {
        paused: bool,
    }

    impl Sequence for ToggleSequence {
        fn pause(&mut self) -> Result<()> {
            self.paused = true;
            Ok(())
        }

        fn resume(&mut self) -> Result<()> {
            self.paused = false;
            Ok(())
        }

        fn is_paused(&self) -> bool {
            self.paused
        }
    }

    #[test]
    fn test_shared_sequence_toggles() {
        let shared = share(ToggleSequence { paused: false });

        lock_sequence(&shared).unwrap().pause().unwrap();
        assert!(lock_sequence(&shared).unwrap().is_paused());

        lock_sequence(&shared).unwrap().resume().unwrap();
        assert!(!lock_sequence(&shared).unwrap().is_paused());
    }

    #[test]
    fn test_both_handles_observe_state() {
        let shared = share(ToggleSequence { paused: false });
        let other = Arc::clone(&shared);

        lock_sequence(&shared).unwrap().pause().unwrap();
        assert!(lock_sequence(&other).unwrap().is_paused());
    }
}
