//! Task queue system for next-frame execution
//!
//! Allows handlers (and background threads) to defer work to the start of
//! the next game frame.

pub mod queue;

pub use queue::*;
