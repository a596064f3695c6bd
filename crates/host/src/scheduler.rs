//! Scheduler abstraction for deferred work
//!
//! Plugins never hold closures over their own state. Instead they submit task
//! values, and get them back from [`Scheduler::poll`] when they are due. The
//! owner of the plugin drives the clock once per frame.
//!
//! ```text
//! handler ── schedule(delay, task) ──► Scheduler
//! frame   ── poll(now) ──► [next-frame tasks..., due timers...] ──► handler
//! ```

use std::time::Duration;

use crate::tasks::FrameQueue;
use crate::timers::{TimerFlags, TimerKey, TimerQueue};

/// Deferred-execution primitives offered to a plugin
pub trait Scheduler<T> {
    /// Run `task` once after `delay` (or repeatedly with `TimerFlags::REPEAT`)
    fn schedule(&mut self, delay: Duration, flags: TimerFlags, task: T) -> TimerKey;

    /// Run `task` at the start of the next frame
    fn next_frame(&mut self, task: T);

    /// Cancel a timer; returns false if it already fired or was cancelled
    fn cancel(&mut self, key: TimerKey) -> bool;

    /// Cancel every timer flagged `STOP_ON_MAPCHANGE`
    fn cancel_mapchange(&mut self) -> usize;

    /// Drop every timer and queued task
    fn clear(&mut self);

    /// Advance the clock to `now` and return every task that is due
    ///
    /// Next-frame tasks come first, in submission order, followed by due
    /// timers in deadline order.
    fn poll(&mut self, now: Duration) -> Vec<T>;

    /// Last clock reading seen by `poll`
    fn now(&self) -> Duration;
}

/// Default scheduler: a timer queue plus a next-frame queue
pub struct TaskScheduler<T> {
    timers: TimerQueue<T>,
    frame: FrameQueue<T>,
    now: Duration,
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskScheduler<T> {
    /// Create an empty scheduler with its clock at zero
    pub fn new() -> Self {
        Self {
            timers: TimerQueue::new(),
            frame: FrameQueue::new(),
            now: Duration::ZERO,
        }
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of tasks waiting for the next frame
    pub fn pending_frame_tasks(&self) -> usize {
        self.frame.len()
    }

    /// Check whether a timer is still pending
    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.timers.contains(key)
    }
}

impl<T: Clone> Scheduler<T> for TaskScheduler<T> {
    fn schedule(&mut self, delay: Duration, flags: TimerFlags, task: T) -> TimerKey {
        self.timers.add(self.now, delay, flags, task)
    }

    fn next_frame(&mut self, task: T) {
        // A full queue already logged the drop.
        let _ = self.frame.push(task);
    }

    fn cancel(&mut self, key: TimerKey) -> bool {
        self.timers.remove(key)
    }

    fn cancel_mapchange(&mut self) -> usize {
        self.timers.remove_mapchange_timers()
    }

    fn clear(&mut self) {
        self.timers.clear();
        self.frame.clear();
    }

    fn poll(&mut self, now: Duration) -> Vec<T> {
        self.now = self.now.max(now);
        let mut due = self.frame.drain();
        due.extend(self.timers.process(self.now));
        due
    }

    fn now(&self) -> Duration {
        self.now
    }
}
