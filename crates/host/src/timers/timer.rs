//! Timer struct and flags

use std::time::Duration;

use bitflags::bitflags;
use slotmap::new_key_type;

new_key_type! {
    /// Key for registered timers
    pub struct TimerKey;
}

bitflags! {
    /// Flags that control timer behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TimerFlags: u32 {
        /// Timer repeats at the specified interval until cancelled
        const REPEAT = 0x01;
        /// Timer is automatically removed when the map changes
        const STOP_ON_MAPCHANGE = 0x02;
    }
}

/// A scheduled timer that yields its task after a delay
pub(crate) struct Timer<T> {
    /// Time between firings (or delay for one-shot timers)
    pub interval: Duration,
    /// The task handed back when the timer fires
    pub task: T,
    /// Behavior flags
    pub flags: TimerFlags,
    /// Host clock reading at which this timer should next fire
    pub next_fire: Duration,
}

impl<T> Timer<T> {
    /// Create a new timer, first firing `interval` after `now`
    pub fn new(now: Duration, interval: Duration, flags: TimerFlags, task: T) -> Self {
        Self {
            interval,
            task,
            flags,
            next_fire: now + interval,
        }
    }

    /// Returns true if the timer repeats
    pub fn repeats(&self) -> bool {
        self.flags.contains(TimerFlags::REPEAT)
    }
}
