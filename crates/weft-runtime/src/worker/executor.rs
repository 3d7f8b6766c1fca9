//! The work-executor boundary.
//!
//! The runtime spawns threads and moves payloads; it does not know how
//! to run a worker's source text. Hosts supply that by implementing
//! [`Executor`] - typically a thin wrapper around an embedded scripting
//! engine plus its value serializer.
//!
//! The serializer stays entirely on the host's side of this boundary:
//! the executor deserializes [`Job::initial`] into live values before
//! running the source, and serializes any escaping error value into the
//! [`Payload`] it returns as `Err`. The runtime routes that payload to
//! the process-wide failure channel unopened.

use crate::payload::Payload;

/// One unit of work handed to a spawned worker.
#[derive(Debug)]
pub struct Job {
    /// The worker's source text.
    pub source: String,
    /// Serialized initial arguments, produced by the host's serializer.
    pub initial: Payload,
}

/// Executes a worker's source text to completion.
///
/// Called exactly once per worker, on the worker's own thread, after
/// the thread's context identity is established. There is no retry: a
/// failed job is reported once and the thread exits.
///
/// # Errors
///
/// `Err` carries the worker's escaping error, already serialized into a
/// payload. Implementations are expected to catch their engine's own
/// failure mechanism (script error, exception) and convert it here; a
/// Rust panic escaping `execute` is not caught by the runtime and
/// terminates only the worker's thread.
pub trait Executor: Send + Sync {
    /// Runs `job` to completion.
    fn execute(&self, job: Job) -> Result<(), Payload>;
}
