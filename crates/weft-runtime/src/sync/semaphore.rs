//! Counting semaphore with deadline-bounded acquisition.
//!
//! [`Semaphore`] is the wait/signal half of a [`Channel`](crate::Channel):
//! producers [`release()`](Semaphore::release) once per item so consumers
//! can block in [`acquire()`](Semaphore::acquire) without busy-waiting.
//!
//! The count lives under a `parking_lot` mutex paired with a condvar, so
//! a `release()` racing with a waiter that is about to block is never
//! lost: the waiter re-checks the count while holding the mutex before
//! it parks.

use parking_lot::{Condvar, Mutex};
use std::time::Instant;

/// A counting semaphore starting at zero.
///
/// There is no fairness or ordering guarantee among waiters.
///
/// # Example
///
/// ```
/// use weft_runtime::sync::Semaphore;
/// use std::time::{Duration, Instant};
///
/// let sem = Semaphore::new();
/// sem.release();
/// sem.acquire(); // consumes the signal without blocking
///
/// // Nothing left: a timed acquire runs out.
/// let deadline = Instant::now() + Duration::from_millis(10);
/// assert!(!sem.try_acquire_until(deadline));
/// ```
#[derive(Debug)]
pub struct Semaphore {
    count: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Creates a semaphore with a count of zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(0),
            available: Condvar::new(),
        }
    }

    /// Increments the count by one and wakes at most one waiter.
    pub fn release(&self) {
        {
            let mut count = self.count.lock();
            *count += 1;
        }
        self.available.notify_one();
    }

    /// Blocks until the count is positive, then decrements it.
    pub fn acquire(&self) {
        let mut count = self.count.lock();
        while *count == 0 {
            self.available.wait(&mut count);
        }
        *count -= 1;
    }

    /// Attempts to decrement the count before `deadline` passes.
    ///
    /// Returns `true` if a signal was consumed. Returns `false` if the
    /// deadline was reached with the count still at zero; the count is
    /// left unchanged in that case.
    ///
    /// A signal that arrives just as the deadline expires may still be
    /// consumed: the count is re-checked after every wakeup, timeouts
    /// included.
    pub fn try_acquire_until(&self, deadline: Instant) -> bool {
        let mut count = self.count.lock();
        while *count == 0 {
            if self.available.wait_until(&mut count, deadline).timed_out() && *count == 0 {
                return false;
            }
        }
        *count -= 1;
        true
    }
}

impl Default for Semaphore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn release_then_acquire_does_not_block() {
        let sem = Semaphore::new();
        sem.release();
        sem.acquire();
    }

    #[test]
    fn timed_acquire_times_out_on_empty() {
        let sem = Semaphore::new();
        let started = Instant::now();
        let ok = sem.try_acquire_until(started + Duration::from_millis(30));
        assert!(!ok);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn failed_timed_acquire_leaves_count_unchanged() {
        let sem = Semaphore::new();
        assert!(!sem.try_acquire_until(Instant::now()));
        sem.release();
        // The signal released after the failed attempt is still there.
        assert!(sem.try_acquire_until(Instant::now() + Duration::from_millis(100)));
    }

    #[test]
    fn acquire_wakes_on_release_from_other_thread() {
        let sem = Arc::new(Semaphore::new());
        let waiter = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || sem.acquire())
        };
        thread::sleep(Duration::from_millis(20));
        sem.release();
        waiter.join().unwrap();
    }

    #[test]
    fn releases_accumulate() {
        let sem = Semaphore::new();
        sem.release();
        sem.release();
        sem.release();
        sem.acquire();
        sem.acquire();
        sem.acquire();
        assert!(!sem.try_acquire_until(Instant::now()));
    }
}
