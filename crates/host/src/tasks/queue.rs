//! Next-frame task queue
//!
//! Work queued here runs at the start of the next game frame, before any
//! timers. The sender half can be cloned and handed to other threads, so a
//! background job can post results back to the game thread.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Capacity of the task queue per frame
pub const QUEUE_CAPACITY: usize = 1024;

/// Error returned when a task could not be queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue is full; the task was dropped
    #[error("Task queue full, task dropped")]
    Full,
    /// The receiving side is gone
    #[error("Task queue disconnected")]
    Disconnected,
}

/// FIFO of tasks to run on the next frame
pub struct FrameQueue<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        let (sender, receiver) = bounded(QUEUE_CAPACITY);
        Self { sender, receiver }
    }

    /// Queue a task to execute on the next game frame
    ///
    /// # Returns
    /// - `Ok(())` if the task was queued
    /// - `Err(QueueError::Full)` if the queue is full (task is dropped)
    pub fn push(&self, task: T) -> Result<(), QueueError> {
        match self.sender.try_send(task) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Task queue full, dropping task");
                Err(QueueError::Full)
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Task queue disconnected");
                Err(QueueError::Disconnected)
            }
        }
    }

    /// A sender that can be moved to another thread
    pub fn sender(&self) -> Sender<T> {
        self.sender.clone()
    }

    /// Take every queued task
    ///
    /// Tasks queued while the drained ones run wait for the following frame.
    /// At most `QUEUE_CAPACITY` tasks are taken per call.
    pub fn drain(&self) -> Vec<T> {
        let pending = self.receiver.len().min(QUEUE_CAPACITY);
        let mut tasks = Vec::with_capacity(pending);
        while tasks.len() < pending {
            match self.receiver.try_recv() {
                Ok(task) => tasks.push(task),
                Err(_) => break,
            }
        }
        tasks
    }

    /// Drop every queued task
    pub fn clear(&self) -> usize {
        self.drain().len()
    }

    /// Check how many tasks are currently queued
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
