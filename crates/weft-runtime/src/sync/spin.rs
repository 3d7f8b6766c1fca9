//! Spinlock for very short critical sections.
//!
//! [`SpinLock`] guards the queue and map mutations inside the runtime:
//! a handful of pointer moves under the lock, never more. For anything
//! that can block, use [`Semaphore`](super::Semaphore) instead; holding
//! a spinlock across a blocking wait stalls every other owner of the
//! lock for the full wait.
//!
//! There is no fairness guarantee and no re-entrancy: a thread that
//! calls [`lock()`](SpinLock::lock) while already holding the same
//! instance deadlocks.

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

/// A minimal test-and-test-and-set spinlock.
///
/// # Example
///
/// ```
/// use weft_runtime::sync::SpinLock;
///
/// let lock = SpinLock::new(vec![1, 2, 3]);
/// lock.lock().push(4);
/// assert_eq!(lock.lock().len(), 4);
/// ```
#[derive(Debug)]
pub struct SpinLock<T> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

// SAFETY: the lock flag serializes all access to `value`; a guard is the
// only path to the inner data, so sharing the lock across threads is safe
// whenever the inner value itself may move between threads.
unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    /// Creates an unlocked spinlock around `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Spins until the lock is claimed, then returns the guard.
    ///
    /// Uses acquire ordering on the claiming exchange and reads the flag
    /// with relaxed loads while spinning, so contended waiters do not
    /// ping-pong the cache line with failed exchanges.
    pub fn lock(&self) -> SpinGuard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
        SpinGuard { lock: self }
    }

    /// Consumes the lock and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: Default> Default for SpinLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// RAII guard returned by [`SpinLock::lock`]. Releases on drop.
#[must_use = "the lock releases as soon as the guard is dropped"]
pub struct SpinGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> Deref for SpinGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: holding the guard means holding the lock flag.
        unsafe { &*self.lock.value.get() }
    }
}

impl<T> DerefMut for SpinGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: holding the guard means holding the lock flag.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for SpinGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn guard_gives_exclusive_access() {
        let lock = SpinLock::new(0u32);
        *lock.lock() = 7;
        assert_eq!(*lock.lock(), 7);
    }

    #[test]
    fn drop_releases_the_lock() {
        let lock = SpinLock::new(());
        drop(lock.lock());
        // A second lock() would spin forever if the first guard leaked the flag.
        drop(lock.lock());
    }

    #[test]
    fn contended_increments_do_not_lose_updates() {
        let lock = Arc::new(SpinLock::new(0u64));
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        *lock.lock() += 1;
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(*lock.lock(), 4_000);
    }

    #[test]
    fn into_inner_returns_value() {
        let lock = SpinLock::new(String::from("done"));
        assert_eq!(lock.into_inner(), "done");
    }
}
