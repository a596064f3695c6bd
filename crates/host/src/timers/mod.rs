//! Timer queue for delayed and repeating tasks
//!
//! Timers carry a task value rather than a closure: when a timer fires the
//! queue hands the task back to its owner, who decides what to do with it.
//! Time is the host's clock, passed in as the elapsed [`Duration`] since the
//! host started, so the queue never reads a wall clock itself.
//!
//! Timers can be configured to:
//! - Fire once after a delay
//! - Repeat at a fixed interval
//! - Be automatically cleaned up on map change
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use botwaves_host::timers::{TimerFlags, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! let key = timers.add(Duration::ZERO, Duration::from_secs(5), TimerFlags::empty(), "hello");
//!
//! // Five seconds later
//! for task in timers.process(Duration::from_secs(5)) {
//!     println!("{task}");
//! }
//! ```

mod timer;

use std::time::Duration;

use slotmap::SlotMap;

use timer::Timer;
pub use timer::{TimerFlags, TimerKey};

/// Registry of pending timers
pub struct TimerQueue<T> {
    timers: SlotMap<TimerKey, Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
        }
    }

    /// Add a timer
    ///
    /// # Arguments
    /// * `now` - Current host clock reading
    /// * `interval` - Delay (one-shot) or interval between firings (repeating)
    /// * `flags` - Combination of `TimerFlags` to control behavior
    /// * `task` - Value handed back each time the timer fires
    ///
    /// # Returns
    /// A key that can be used to cancel the timer via `remove`
    pub fn add(&mut self, now: Duration, interval: Duration, flags: TimerFlags, task: T) -> TimerKey {
        self.timers.insert(Timer::new(now, interval, flags, task))
    }

    /// Remove/cancel a timer
    ///
    /// # Returns
    /// `true` if the timer was found and removed, `false` if not found
    pub fn remove(&mut self, key: TimerKey) -> bool {
        self.timers.remove(key).is_some()
    }

    /// Check whether a timer is still pending
    pub fn contains(&self, key: TimerKey) -> bool {
        self.timers.contains_key(key)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if no timers are pending
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove every timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Remove all timers with the STOP_ON_MAPCHANGE flag
    ///
    /// Returns the number of timers removed.
    pub fn remove_mapchange_timers(&mut self) -> usize {
        let before = self.timers.len();
        self.timers
            .retain(|_, timer| !timer.flags.contains(TimerFlags::STOP_ON_MAPCHANGE));
        let removed = before - self.timers.len();
        if removed > 0 {
            tracing::debug!("Removed {} timers on map change", removed);
        }
        removed
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Collect the tasks of every timer that is due at `now`
    ///
    /// One-shot timers are removed after firing, while repeating timers are
    /// rescheduled one interval after `now`. Tasks are returned in firing
    /// order (earliest deadline first).
    pub fn process(&mut self, now: Duration) -> Vec<T> {
        let mut due: Vec<(Duration, TimerKey)> = self
            .timers
            .iter()
            .filter(|(_, timer)| now >= timer.next_fire)
            .map(|(key, timer)| (timer.next_fire, key))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        let mut fired = Vec::with_capacity(due.len());
        for (_, key) in due {
            let repeats = match self.timers.get_mut(key) {
                Some(timer) if timer.repeats() => {
                    fired.push(timer.task.clone());
                    timer.next_fire = now + timer.interval;
                    true
                }
                Some(_) => false,
                None => continue,
            };

            if !repeats {
                if let Some(timer) = self.timers.remove(key) {
                    fired.push(timer.task);
                }
            }
        }

        fired
    }
}
