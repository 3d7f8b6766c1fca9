//! Low-level synchronization primitives.
//!
//! Two primitives cover the runtime's needs:
//!
//! - [`SpinLock`]: mutual exclusion for queue/map mutation, held for a
//!   handful of operations and never across a wait
//! - [`Semaphore`]: cross-thread wait/signal with deadline support, used
//!   by channels to block consumers without busy-waiting

mod semaphore;
mod spin;

pub use semaphore::Semaphore;
pub use spin::{SpinGuard, SpinLock};
