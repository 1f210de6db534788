//! Callback-step timeline
//!
//! A [`Timeline`] places one-shot callback steps on a local time axis and
//! fires them, in position order, as the playhead advances. The playhead only
//! moves while playing: pausing freezes it in place and resuming continues
//! from the exact same position, so a fired step never refires and an unfired
//! step is never skipped.
//!
//! Steps are plain callbacks, not tweens - the timeline orders and gates
//! work, it does not interpolate values.

use overture_core::{Result, Sequence};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a step added to a timeline
    pub struct TimelineEntryId;
}

/// A one-shot step action.
pub type StepFn = Box<dyn FnMut() + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayState {
    Stopped,
    Playing,
    Paused,
}

struct Entry {
    /// Position on the timeline's local time axis
    at_ms: f64,
    /// Insertion order, breaks position ties
    seq: u64,
    fired: bool,
    action: StepFn,
}

/// An ordered sequence of positioned callback steps.
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, Entry>,
    next_seq: u64,
    elapsed_ms: f64,
    end_ms: f64,
    state: PlayState,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            next_seq: 0,
            elapsed_ms: 0.0,
            end_ms: 0.0,
            state: PlayState::Stopped,
        }
    }

    /// Add a step at an absolute position on the time axis.
    pub fn add_at<F>(&mut self, at_ms: f64, action: F) -> TimelineEntryId
    where
        F: FnMut() + Send + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.end_ms = self.end_ms.max(at_ms);
        self.entries.insert(Entry {
            at_ms,
            seq,
            fired: false,
            action: Box::new(action),
        })
    }

    /// Add a step `gap_ms` after the current end of the timeline.
    pub fn append<F>(&mut self, gap_ms: f64, action: F) -> TimelineEntryId
    where
        F: FnMut() + Send + 'static,
    {
        self.add_at(self.end_ms + gap_ms, action)
    }

    /// Rewind to position 0, clear every fired flag, and begin playing.
    pub fn start(&mut self) {
        tracing::debug!(entries = self.entries.len(), "timeline started");
        self.elapsed_ms = 0.0;
        for (_, entry) in self.entries.iter_mut() {
            entry.fired = false;
        }
        self.state = PlayState::Playing;
    }

    /// Halt playback. A later [`start`] rewinds and replays from 0.
    ///
    /// [`start`]: Timeline::start
    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
    }

    /// Freeze the playhead in place.
    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    /// Continue from the exact position [`pause`] froze at.
    ///
    /// Resuming a timeline that was never started begins playing from 0.
    ///
    /// [`pause`]: Timeline::pause
    pub fn resume(&mut self) {
        self.state = PlayState::Playing;
    }

    /// Advance the playhead by `dt_ms` and fire every step it passes.
    ///
    /// Steps fire in position order; equal positions fire in insertion
    /// order. Does nothing unless playing.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.state != PlayState::Playing {
            return;
        }
        self.elapsed_ms += dt_ms;

        let mut due: SmallVec<[(TimelineEntryId, f64, u64); 8]> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.fired && entry.at_ms <= self.elapsed_ms)
            .map(|(id, entry)| (id, entry.at_ms, entry.seq))
            .collect();
        due.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });

        for (id, _, _) in due {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.fired = true;
                (entry.action)();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Whether every step has fired and the playhead reached the end.
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.end_ms && self.entries.iter().all(|(_, entry)| entry.fired)
    }

    /// Playhead position over the timeline's span, 0.0 to 1.0.
    ///
    /// An empty timeline reports 1.0.
    pub fn progress(&self) -> f32 {
        if self.end_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.end_ms).clamp(0.0, 1.0) as f32
    }

    /// Position of the last step on the time axis.
    pub fn duration_ms(&self) -> f64 {
        self.end_ms
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether a step has fired this run.
    pub fn has_fired(&self, id: TimelineEntryId) -> bool {
        self.entries.get(id).map(|entry| entry.fired).unwrap_or(false)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence for Timeline {
    fn pause(&mut self) -> Result<()> {
        Timeline::pause(self);
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        Timeline::resume(self);
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overture_core::{lock_sequence, share};
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> impl FnMut() + Send {
        let log = Arc::clone(log);
        move || log.lock().unwrap().push(tag)
    }

    #[test]
    fn test_steps_fire_in_position_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tl = Timeline::new();
        tl.add_at(300.0, recorder(&log, "late"));
        tl.add_at(100.0, recorder(&log, "early"));
        tl.start();

        tl.tick(150.0);
        assert_eq!(*log.lock().unwrap(), vec!["early"]);

        tl.tick(150.0);
        assert_eq!(*log.lock().unwrap(), vec!["early", "late"]);
        assert!(tl.is_finished());
    }

    #[test]
    fn test_equal_positions_fire_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tl = Timeline::new();
        tl.add_at(100.0, recorder(&log, "first"));
        tl.add_at(100.0, recorder(&log, "second"));
        tl.start();

        // One oversized tick reaches both at once.
        tl.tick(500.0);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_append_positions_after_current_end() {
        let mut tl = Timeline::new();
        tl.add_at(200.0, || {});
        let id = tl.append(300.0, || {});
        assert_eq!(tl.duration_ms(), 500.0);

        tl.start();
        tl.tick(499.0);
        assert!(!tl.has_fired(id));
        tl.tick(1.0);
        assert!(tl.has_fired(id));
    }

    #[test]
    fn test_pause_freezes_playhead() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tl = Timeline::new();
        tl.add_at(100.0, recorder(&log, "step"));
        tl.start();

        tl.tick(50.0);
        tl.pause();
        // Ticks while paused move nothing.
        tl.tick(1000.0);
        assert!(log.lock().unwrap().is_empty());

        // Resume continues from 50ms: 49 more is still short, 1 more lands it.
        tl.resume();
        tl.tick(49.0);
        assert!(log.lock().unwrap().is_empty());
        tl.tick(1.0);
        assert_eq!(*log.lock().unwrap(), vec!["step"]);
    }

    #[test]
    fn test_fired_step_never_refires() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tl = Timeline::new();
        tl.add_at(10.0, recorder(&log, "once"));
        tl.start();

        tl.tick(20.0);
        tl.tick(20.0);
        tl.tick(20.0);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_start_rewinds_and_replays() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tl = Timeline::new();
        tl.add_at(10.0, recorder(&log, "step"));

        tl.start();
        tl.tick(20.0);
        tl.start();
        tl.tick(20.0);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_progress_tracks_playhead() {
        let mut tl = Timeline::new();
        tl.add_at(200.0, || {});
        tl.start();
        assert_eq!(tl.progress(), 0.0);

        tl.tick(50.0);
        assert_eq!(tl.progress(), 0.25);

        tl.tick(500.0);
        assert_eq!(tl.progress(), 1.0);
    }

    #[test]
    fn test_timeline_as_shared_sequence() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tl = Timeline::new();
        tl.add_at(10.0, recorder(&log, "step"));
        let shared = share(tl);

        lock_sequence(&shared).unwrap().pause().unwrap();
        assert!(lock_sequence(&shared).unwrap().is_paused());

        // Resuming a never-started timeline plays from 0.
        lock_sequence(&shared).unwrap().resume().unwrap();
        assert!(!lock_sequence(&shared).unwrap().is_paused());
    }
}
