//! Channel - unbounded FIFO payload queue.
//!
//! A [`Channel`] combines a [`SpinLock`]-guarded queue with a
//! [`Semaphore`] so consumers can block without busy-waiting. One
//! instance is freely shared by any number of producers and consumers.
//!
//! # Delivery semantics
//!
//! - Items come out in push order.
//! - Each item is delivered to exactly one consumer (competing
//!   consumers, not broadcast).
//! - The queue is unbounded: [`push()`](Channel::push) never blocks and
//!   never fails.
//!
//! # Example
//!
//! ```
//! use weft_runtime::{Channel, Payload};
//!
//! let ch = Channel::new();
//! ch.push(Payload::from_bytes(&b"first"[..]));
//! ch.push(Payload::from_bytes(&b"second"[..]));
//!
//! assert_eq!(ch.pop().unwrap().as_bytes(), b"first");
//! assert_eq!(ch.blocked_pop().as_bytes(), b"second");
//! assert!(ch.pop().is_none());
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::payload::Payload;
use crate::sync::{Semaphore, SpinLock};

/// An unbounded FIFO queue of [`Payload`]s with blocking and timed
/// consumption.
#[derive(Debug)]
pub struct Channel {
    queue: SpinLock<VecDeque<Payload>>,
    ready: Semaphore,
}

impl Channel {
    /// Creates an empty channel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: SpinLock::new(VecDeque::new()),
            ready: Semaphore::new(),
        }
    }

    /// Appends a payload to the tail and signals one waiting consumer.
    ///
    /// Ownership of the payload moves into the queue. The semaphore is
    /// released exactly once per pushed item, outside the spinlock.
    pub fn push(&self, payload: Payload) {
        {
            let mut queue = self.queue.lock();
            queue.push_back(payload);
        }
        self.ready.release();
    }

    /// Removes and returns the head payload, or `None` if the queue is
    /// empty right now. Never blocks.
    pub fn pop(&self) -> Option<Payload> {
        let mut queue = self.queue.lock();
        queue.pop_front()
    }

    /// Blocks until a payload is available and returns it.
    ///
    /// Loops over try-pop and semaphore acquire, so a wakeup whose item
    /// was won by a competing consumer simply re-waits. Returns promptly
    /// after a matching [`push()`](Channel::push); there is no poll
    /// interval.
    pub fn blocked_pop(&self) -> Payload {
        loop {
            if let Some(payload) = self.pop() {
                return payload;
            }
            self.ready.acquire();
        }
    }

    /// Waits up to `timeout` for a payload.
    ///
    /// The absolute deadline is fixed on entry. The fast path is a
    /// non-blocking pop; after that the call waits on the semaphore and
    /// re-pops on every wakeup, always against the *original* deadline.
    /// A consumer that is woken but loses the item to a competitor does
    /// not get its wait extended.
    ///
    /// Returns `None` only when the deadline passes with no payload
    /// obtained. The deadline is a lower bound on waiting rather than a
    /// hard cutoff: a payload that arrives as the deadline expires may
    /// still be returned slightly late instead of being dropped.
    pub fn timed_pop(&self, timeout: Duration) -> Option<Payload> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(payload) = self.pop() {
                return Some(payload);
            }
            if !self.ready.try_acquire_until(deadline) {
                return None;
            }
        }
    }

    /// Returns the number of queued payloads at this instant.
    ///
    /// Purely informational under concurrency; the value may be stale
    /// by the time the caller looks at it.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns `true` if no payloads were queued at this instant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}
