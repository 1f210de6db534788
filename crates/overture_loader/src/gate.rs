//! Progress-gated sequencer
//!
//! Couples a discrete counter to a pausable sequence: the counter advances
//! from 0 to a target on a repeating tick, publishing each value to a display
//! sink, while the sequence is held paused. Only once the final value has
//! been written - on the tick after that write, never concurrently with it -
//! is the sequence resumed and the tick source cancelled.
//!
//! The gating decision is driven by delivery order on the tick source, not by
//! wall-clock time: a delayed tick delays the release, it never lets the
//! sequence run ahead of the counter.

use crate::error::{GateError, Result};
use overture_core::{
    lock_sequence, CoreError, ProgressSink, SharedSequence, TickDirective, TickTaskId, Ticker,
};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

/// Lifecycle of a progress gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Before `start()`; no tick source active
    Idle,
    /// Tick source active, counter advancing, sequence held paused
    Counting,
    /// Terminal: every value published, sequence running
    Released,
    /// Terminal: a sink or sequence failure stopped the count
    Failed,
}

struct GateInner {
    state: GateState,
    count: u32,
    target: u32,
    task: Option<TickTaskId>,
    sink: Box<dyn ProgressSink>,
    sequence: SharedSequence,
}

/// Single-use sequencer that releases a paused sequence once a counter
/// completes.
///
/// One activation per gate: `Idle -> Counting -> Released` (or `Failed`).
/// The tick facility and the sequence handle are injected; the gate never
/// reaches into ambient globals.
///
/// # Example
///
/// ```ignore
/// let mut gate = ProgressGate::new(|value| print!("\r{value:>3}%"), intro.clone());
/// gate.start(100, Duration::from_millis(25), &mut ticker)?;
/// // pump `ticker` from the host loop; the intro resumes after "100" paints
/// ```
pub struct ProgressGate {
    inner: Arc<Mutex<GateInner>>,
}

impl ProgressGate {
    /// Create an idle gate around a display sink and a shared sequence.
    ///
    /// The sequence is referenced, not owned: the caller keeps its own
    /// handle and remains free to add steps; only the gate resumes it.
    pub fn new<S>(sink: S, sequence: SharedSequence) -> Self
    where
        S: ProgressSink + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(GateInner {
                state: GateState::Idle,
                count: 0,
                target: 0,
                task: None,
                sink: Box::new(sink),
                sequence,
            })),
        }
    }

    /// Begin counting from 0 towards `target`.
    ///
    /// Pauses the sequence itself before the first tick can fire - the
    /// caller's pause state is never assumed - then schedules the tick task
    /// and enters `Counting`.
    ///
    /// Fails fast on a zero target or interval, and on any gate that is not
    /// idle: two tick sources racing to control the same sequence is exactly
    /// the bug class this component exists to prevent.
    pub fn start(
        &mut self,
        target: u32,
        interval: Duration,
        ticker: &mut dyn Ticker,
    ) -> Result<()> {
        if target == 0 {
            return Err(GateError::ZeroTarget);
        }
        if interval.is_zero() {
            return Err(GateError::ZeroInterval);
        }

        let mut inner = self.lock()?;
        if inner.state != GateState::Idle {
            return Err(GateError::AlreadyStarted(inner.state));
        }

        lock_sequence(&inner.sequence)?.pause()?;

        inner.count = 0;
        inner.target = target;
        inner.state = GateState::Counting;

        let weak = Arc::downgrade(&self.inner);
        let id = ticker.schedule_repeating(interval, Box::new(move || Self::on_tick(&weak)));
        inner.task = Some(id);

        tracing::debug!(
            interval_ms = interval.as_millis() as u64,
            "gate counting to {target}"
        );
        Ok(())
    }

    /// Caller-initiated teardown, e.g. navigating away mid-count.
    ///
    /// While counting this cancels the tick source, rewinds the counter and
    /// returns the gate to `Idle`; the sequence is left paused. In any other
    /// state it has no observable effect - in particular, calling it after
    /// `Released` neither double-cancels nor resumes a second time.
    pub fn abort(&mut self, ticker: &mut dyn Ticker) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.state == GateState::Counting {
            if let Some(id) = inner.task.take() {
                ticker.cancel(id);
            }
            inner.count = 0;
            inner.state = GateState::Idle;
            tracing::debug!("gate aborted");
        }
        Ok(())
    }

    /// Current lifecycle state. A poisoned gate reports `Failed`.
    pub fn state(&self) -> GateState {
        self.inner
            .lock()
            .map(|inner| inner.state)
            .unwrap_or(GateState::Failed)
    }

    /// Current counter value.
    pub fn count(&self) -> u32 {
        self.inner.lock().map(|inner| inner.count).unwrap_or(0)
    }

    /// Target the counter runs to.
    pub fn target(&self) -> u32 {
        self.inner.lock().map(|inner| inner.target).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, GateInner>> {
        self.inner.lock().map_err(|_| GateError::Poisoned)
    }

    /// One tick of the counter.
    ///
    /// While `count <= target`: publish, then increment. The tick after the
    /// final write is the one that releases - the write has observably
    /// committed by then, so the display can never lag the release.
    fn on_tick(weak: &Weak<Mutex<GateInner>>) -> overture_core::Result<TickDirective> {
        let Some(inner) = weak.upgrade() else {
            // Gate dropped mid-count; nothing left to drive.
            return Ok(TickDirective::Cancel);
        };
        let mut gate = inner
            .lock()
            .map_err(|_| CoreError::Tick("gate state poisoned".to_string()))?;

        if gate.state != GateState::Counting {
            // Aborted after this invocation was already queued.
            return Ok(TickDirective::Cancel);
        }

        if gate.count <= gate.target {
            let value = gate.count;
            if let Err(err) = gate.sink.write(value) {
                gate.state = GateState::Failed;
                gate.task = None;
                return Err(err);
            }
            gate.count += 1;
            return Ok(TickDirective::Continue);
        }

        let sequence = Arc::clone(&gate.sequence);
        match lock_sequence(&sequence).and_then(|mut seq| seq.resume()) {
            Ok(()) => {
                gate.state = GateState::Released;
                gate.task = None;
                tracing::debug!(count = gate.count, "gate released");
                Ok(TickDirective::Cancel)
            }
            Err(err) => {
                gate.state = GateState::Failed;
                gate.task = None;
                Err(err)
            }
        }
    }
}
