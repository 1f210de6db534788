//! Tick registration and delivery
//!
//! A [`Ticker`] hands out cancellable handles for repeating tasks. The
//! concrete [`ManualTicker`] is a deterministic, host-pumped driver: the host
//! owns the loop and calls [`ManualTicker::advance`] with each frame's delta,
//! and due tasks fire in deadline order on a logical clock. Correctness of
//! anything built on top depends on that delivery order, never on wall-clock
//! elapsed time.
//!
//! Tasks steer their own lifetime through their return value: yielding
//! [`TickDirective::Cancel`] removes the task from inside its own invocation,
//! so no re-entrant call into the driver is ever needed.

use crate::error::Result;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled repeating task
    pub struct TickTaskId;
}

/// What the driver should do with a task once its invocation returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickDirective {
    /// Keep the task scheduled for its next interval
    Continue,
    /// Remove the task; it never fires again
    Cancel,
}

/// A repeating task callback.
///
/// Errors remove the task and surface from the driver's pump.
pub type TickFn = Box<dyn FnMut() -> Result<TickDirective> + Send>;

/// Cancellable repeating-tick registration.
pub trait Ticker {
    /// Register `task` to fire every `interval` on the driver's clock.
    fn schedule_repeating(&mut self, interval: Duration, task: TickFn) -> TickTaskId;

    /// Stop future invocations of `id`.
    ///
    /// Returns `false` if the task was already removed, which is not an
    /// error: tasks also remove themselves via [`TickDirective::Cancel`].
    fn cancel(&mut self, id: TickTaskId) -> bool;
}

/// Frame-delta clamping policy for a stalled host loop.
///
/// When a single pump's delta exceeds `threshold`, the ticker treats it as
/// `adjusted_lag` instead, so a long stall produces one bounded catch-up step
/// rather than a burst of back-to-back firings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LagSmoothing {
    /// Deltas above this are considered a stall
    pub threshold: Duration,
    /// The delta substituted for a stalled frame
    pub adjusted_lag: Duration,
}

impl LagSmoothing {
    pub fn new(threshold: Duration, adjusted_lag: Duration) -> Self {
        Self {
            threshold,
            adjusted_lag,
        }
    }

    /// Clamp a frame delta according to this policy.
    pub fn apply(&self, dt: Duration) -> Duration {
        if dt > self.threshold {
            self.adjusted_lag
        } else {
            dt
        }
    }
}

struct ScheduledTask {
    interval: Duration,
    /// Deadline on the logical clock
    next_due: Duration,
    /// Registration order, breaks deadline ties
    seq: u64,
    tick: TickFn,
}

/// Deterministic host-pumped tick driver.
///
/// The host calls [`advance`] from its own loop; there is no background
/// thread and no blocking wait. Each task fires at most once per pump, so a
/// handle never has more than one invocation pending regardless of how far
/// the clock jumped.
///
/// [`advance`]: ManualTicker::advance
pub struct ManualTicker {
    tasks: SlotMap<TickTaskId, ScheduledTask>,
    now: Duration,
    next_seq: u64,
    lag: Option<LagSmoothing>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            now: Duration::ZERO,
            next_seq: 0,
            lag: None,
        }
    }

    /// Install or clear the lag smoothing policy. `None` disables clamping.
    pub fn set_lag_smoothing(&mut self, lag: Option<LagSmoothing>) {
        self.lag = lag;
    }

    /// Current logical time, the sum of every (possibly clamped) pump delta.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still scheduled.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Move the logical clock by `dt` and fire every due task once.
    ///
    /// Tasks fire in deadline order; equal deadlines fire in registration
    /// order. A task that returns [`TickDirective::Cancel`] is removed. A
    /// task that errors is removed and the error returned, leaving the
    /// remaining due tasks for the next pump.
    pub fn advance(&mut self, dt: Duration) -> Result<()> {
        let dt = match self.lag {
            Some(lag) => lag.apply(dt),
            None => dt,
        };
        self.now += dt;

        let mut due: SmallVec<[(TickTaskId, Duration, u64); 8]> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.next_due <= self.now)
            .map(|(id, task)| (id, task.next_due, task.seq))
            .collect();
        due.sort_by_key(|&(_, deadline, seq)| (deadline, seq));

        for (id, _, _) in due {
            // A task that fired earlier this pump may have been cancelled
            // from outside in a previous pump's error path; skip stale ids.
            let Some(task) = self.tasks.get_mut(id) else {
                continue;
            };
            task.next_due = self.now + task.interval;
            match (task.tick)() {
                Ok(TickDirective::Continue) => {}
                Ok(TickDirective::Cancel) => {
                    tracing::debug!("tick task cancelled itself");
                    self.tasks.remove(id);
                }
                Err(err) => {
                    tracing::warn!("tick task failed, removing: {err}");
                    self.tasks.remove(id);
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

impl Default for ManualTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for ManualTicker {
    fn schedule_repeating(&mut self, interval: Duration, task: TickFn) -> TickTaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(ScheduledTask {
            interval,
            next_due: self.now + interval,
            seq,
            tick: task,
        })
    }

    fn cancel(&mut self, id: TickTaskId) -> bool {
        self.tasks.remove(id).is_some()
    }
}
