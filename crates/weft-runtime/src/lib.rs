//! weft-runtime - cross-thread message passing and worker lifecycle.
//!
//! Workers (plain OS threads running host-supplied work) communicate
//! through named, globally addressable channels; the runtime tracks
//! worker identity and routes uncaught worker failures to a single
//! process-wide failure channel.
//!
//! # Architecture
//!
//! ```text
//!               ┌────────────────────────────────────────────┐
//!               │  ChannelRegistry (process-wide, name→chan) │
//!               └───────┬───────────────────┬────────────────┘
//!                       ▼                   ▼
//!              ┌─────────────┐       ┌─────────────┐
//!   push ────► │   Channel   │       │   Channel   │ ◄──── push
//!              │ (FIFO+sem)  │       │ (FIFO+sem)  │
//!  pop/bpop ◄──┴─────────────┘       └─────────────┴──► timed_pop
//!                       ▲                   ▲
//!        ┌──────────────┴───────────────────┴─────────────┐
//!        │   Workers (one OS thread each, ids 1,2,3,...)  │
//!        │   spawned by worker::spawn(executor, src, p)   │
//!        └──────────────────────┬─────────────────────────┘
//!                               │ uncaught failure (serialized)
//!                               ▼
//!               ┌────────────────────────────────────────┐
//!               │  failure_channel() (ordinary Channel)  │──► supervisor
//!               └────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`sync`]: [`SpinLock`](sync::SpinLock) for map/queue critical
//!   sections, [`Semaphore`](sync::Semaphore) for blocking waits
//! - [`channel`]: [`Channel`] and [`ChannelRegistry`]
//! - [`worker`]: id allocation, [`spawn`](worker::spawn), the
//!   [`Executor`](worker::Executor) boundary and the failure channel
//!
//! # Payloads are opaque
//!
//! Channels carry [`Payload`]s: relocatable byte buffers produced by a
//! host serializer. The runtime moves them between threads but never
//! reads them; ownership transfers on every push and pop.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use weft_runtime::{ChannelRegistry, Payload};
//!
//! let registry = ChannelRegistry::new();
//! let jobs = registry.create("jobs")?;
//!
//! jobs.push(Payload::from_bytes(&b"unit of work"[..]));
//!
//! let got = jobs.timed_pop(Duration::from_millis(100)).expect("pushed above");
//! assert_eq!(got.as_bytes(), b"unit of work");
//! # Ok::<(), weft_runtime::RuntimeError>(())
//! ```

mod channel;
mod error;
mod payload;

pub mod sync;
pub mod worker;

// ---- Public re-exports ----

pub use channel::{Channel, ChannelRef, ChannelRegistry};
pub use error::RuntimeError;
pub use payload::Payload;
pub use weft_types::{ErrorCode, WorkerId};
