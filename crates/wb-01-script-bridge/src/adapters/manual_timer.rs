//! Simulated-time scheduler.
//!
//! Nothing fires until [`ManualTimerScheduler::advance`] moves the clock.
//! Makes timeout behaviour deterministic in tests and in hosts that drive
//! their own event loop.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::ports::{TimerHandle, TimerScheduler, TimerTask};

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    /// (deadline, id) → task; ordered so ties fire in scheduling order
    queue: BTreeMap<(Duration, u64), TimerTask>,
    deadlines: HashMap<u64, Duration>,
}

/// Scheduler driven by an explicit clock.
#[derive(Default)]
pub struct ManualTimerScheduler {
    state: Mutex<ClockState>,
}

impl ManualTimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Tasks scheduled and not yet fired or cancelled.
    pub fn pending_timers(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Move the clock forward, running every task that falls due, in
    /// deadline order. Returns how many tasks ran.
    ///
    /// Tasks run without the clock lock held, so they may schedule or
    /// cancel other timers.
    pub fn advance(&self, by: Duration) -> usize {
        let target = {
            let mut state = self.state.lock();
            state.now += by;
            state.now
        };

        let mut fired = 0;
        loop {
            let task = {
                let mut state = self.state.lock();
                let due = match state.queue.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                state.deadlines.remove(&due.1);
                state.queue.remove(&due)
            };
            if let Some(task) = task {
                task();
                fired += 1;
            }
        }
        fired
    }
}

impl TimerScheduler for ManualTimerScheduler {
    fn schedule_once(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        let deadline = state.now + delay;
        state.queue.insert((deadline, id), task);
        state.deadlines.insert(id, deadline);
        TimerHandle::new(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut state = self.state.lock();
        if let Some(deadline) = state.deadlines.remove(&handle.get()) {
            state.queue.remove(&(deadline, handle.get()));
        }
    }
}
