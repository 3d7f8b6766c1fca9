//! Worker lifecycle: identity, spawning and failure reporting.
//!
//! - [`next_id`] / [`current_id`]: process-wide id allocation with
//!   per-context memoization (main context is id `0`)
//! - [`spawn`] / [`WorkerHandle`]: one OS thread per worker, joinable
//!   or fire-and-forget
//! - [`Executor`] / [`Job`]: the host-supplied execution boundary
//! - [`failure_channel`]: where uncaught worker failures land
//! - [`reset`]: main-context-only teardown of names and ids

mod executor;
mod failure;
mod lifecycle;

pub use executor::{Executor, Job};
pub use failure::failure_channel;
pub use lifecycle::{current_id, next_id, reset, spawn, WorkerHandle};
