//! Periodic timer capability injected into the simulation.
//!
//! A scheduler never calls back into the simulation. The owner polls it
//! with [`Scheduler::due`] and decides how many steps to run, which
//! keeps every step on the caller's thread and never overlapping another.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Smallest period a timer will run at
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub trait Scheduler {
    /// Begin a periodic timer. The first period elapses `interval` from now.
    fn start_periodic(&mut self, interval: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Number of periods of `handle` that elapsed since the last poll.
    /// Cancelled handles never come due.
    fn due(&mut self, handle: TimerHandle) -> u32;
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    interval: Duration,
    next_due: Duration,
}

/// Timer bookkeeping shared by the clock implementations
#[derive(Debug, Default)]
struct Timers {
    next_id: u64,
    active: HashMap<TimerHandle, Timer>,
    started: usize,
    cancelled: usize,
}

impl Timers {
    fn start(&mut self, now: Duration, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.started += 1;

        let interval = interval.max(MIN_PERIOD);
        self.active.insert(handle, Timer { interval, next_due: now + interval });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active.remove(&handle).is_some() {
            self.cancelled += 1;
        }
    }

    fn due(&mut self, handle: TimerHandle, now: Duration) -> u32 {
        let Some(timer) = self.active.get_mut(&handle) else {
            return 0;
        };

        if timer.next_due > now {
            return 0;
        }

        let interval = timer.interval.as_nanos();
        let late = (now - timer.next_due).as_nanos();
        let periods = late / interval + 1;

        // Next boundary strictly after `now`, on the original cadence
        let into_period = u64::try_from(late % interval).unwrap_or(u64::MAX);
        timer.next_due = now - Duration::from_nanos(into_period) + timer.interval;

        u32::try_from(periods).unwrap_or(u32::MAX)
    }
}

/// Deterministic clock that only moves when told to.
/// Clones share the same clock, so a test can keep one and hand another to
/// the simulation.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualState>>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    timers: Timers,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.inner.borrow_mut().now += by;
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Timers started and not yet cancelled
    pub fn active_timers(&self) -> usize {
        self.inner.borrow().timers.active.len()
    }

    pub fn started_timers(&self) -> usize {
        self.inner.borrow().timers.started
    }

    pub fn cancelled_timers(&self) -> usize {
        self.inner.borrow().timers.cancelled
    }
}

impl Scheduler for ManualClock {
    fn start_periodic(&mut self, interval: Duration) -> TimerHandle {
        let mut state = self.inner.borrow_mut();
        let now = state.now;
        state.timers.start(now, interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.cancel(handle);
    }

    fn due(&mut self, handle: TimerHandle) -> u32 {
        let mut state = self.inner.borrow_mut();
        let now = state.now;
        state.timers.due(handle, now)
    }
}

/// Wall clock backed by [`Instant`]
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    timers: Timers,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            timers: Timers::default(),
        }
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SystemClock {
    fn start_periodic(&mut self, interval: Duration) -> TimerHandle {
        let now = self.now();
        self.timers.start(now, interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
    }

    fn due(&mut self, handle: TimerHandle) -> u32 {
        let now = self.now();
        self.timers.due(handle, now)
    }
}
