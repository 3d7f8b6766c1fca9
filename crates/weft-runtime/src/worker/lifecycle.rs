//! Worker identity allocation and thread lifecycle.
//!
//! Every execution context - the originating ("main") context and each
//! spawned worker - carries a [`WorkerId`]. Ids come from one
//! process-wide lock-free allocator and are strictly increasing; id `0`
//! belongs to the main context and is assigned lazily the first time
//! any identity is queried.
//!
//! # Worker lifecycle
//!
//! ```text
//! spawn() ──► Running ──► { completed | failure reported } ──► joinable
//!                                                                 │
//!                                              join() or abandon ─┘
//! ```
//!
//! One `spawn` provisions exactly one OS thread; there is no pooling,
//! no pause and no cancellation. A worker runs to completion, and an
//! escaping failure is serialized onto the failure channel rather than
//! propagated to the spawner.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};
use weft_types::WorkerId;

use crate::channel::ChannelRegistry;
use crate::error::RuntimeError;
use crate::payload::Payload;
use crate::worker::executor::{Executor, Job};
use crate::worker::failure::failure_channel;

/// Next id to hand out. The main context claims 0 on first query.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// This thread's memoized context identity.
    static CONTEXT_ID: Cell<Option<WorkerId>> = const { Cell::new(None) };
}

/// Allocates a fresh worker id.
///
/// Race-free against concurrent callers via a compare-and-swap retry
/// loop; ids are strictly increasing in allocation order and never
/// reused before a [`reset()`].
#[must_use]
pub fn next_id() -> WorkerId {
    let mut current = NEXT_ID.load(Ordering::Relaxed);
    loop {
        match NEXT_ID.compare_exchange_weak(
            current,
            current + 1,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(claimed) => return WorkerId::new(claimed),
            Err(observed) => current = observed,
        }
    }
}

/// Returns the calling context's identity.
///
/// Memoized per thread: the first query allocates via [`next_id()`] and
/// every later query returns the same id. Spawned workers have their
/// identity installed by the runtime before their executor runs, so for
/// them this never allocates. The first context in the process to be
/// identified - normally the originating thread - receives id `0` and
/// becomes the main context.
#[must_use]
pub fn current_id() -> WorkerId {
    CONTEXT_ID.with(|slot| match slot.get() {
        Some(id) => id,
        None => {
            let id = next_id();
            slot.set(Some(id));
            id
        }
    })
}

/// Installs a spawned worker's allocated identity on its own thread.
fn adopt_id(id: WorkerId) {
    CONTEXT_ID.with(|slot| {
        debug_assert!(slot.get().is_none(), "context identity assigned twice");
        slot.set(Some(id));
    });
}

/// Handle to a spawned worker's OS thread.
///
/// Dropping the handle abandons the worker (fire-and-forget); the
/// thread keeps running to completion either way. Results and failures
/// never travel through the handle - only through channels.
#[derive(Debug)]
pub struct WorkerHandle {
    id: WorkerId,
    thread: thread::JoinHandle<()>,
}

impl WorkerHandle {
    /// The worker's allocated id.
    #[must_use]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Returns `true` if the worker's thread has terminated.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the worker's thread has terminated.
    ///
    /// Does not retrieve any result; a worker that panicked (as opposed
    /// to reporting a failure through its executor) is logged and
    /// otherwise ignored.
    pub fn join(self) {
        if self.thread.join().is_err() {
            warn!("{} thread terminated by panic", self.id);
        }
    }
}

/// Spawns a worker thread running `source` under `executor`.
///
/// Allocates the worker's id, then starts an OS thread (named
/// `worker-{id}` for diagnostics) whose entry point installs that id as
/// the thread's context identity and hands the job to the executor.
/// Returns immediately with a joinable [`WorkerHandle`].
///
/// An error value escaping the executor is pushed, already serialized,
/// onto the [`failure_channel()`]; it does not reach this function's
/// caller.
///
/// # Errors
///
/// [`ThreadCreateFailed`](RuntimeError::ThreadCreateFailed) with the OS
/// error text if the thread cannot be created. The moved-in source and
/// payload are dropped before returning, so nothing leaks.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use weft_runtime::worker::{spawn, Executor, Job};
/// use weft_runtime::Payload;
///
/// struct NopExecutor;
///
/// impl Executor for NopExecutor {
///     fn execute(&self, _job: Job) -> Result<(), Payload> {
///         Ok(())
///     }
/// }
///
/// let handle = spawn(
///     Arc::new(NopExecutor),
///     "return nothing",
///     Payload::from_bytes(Vec::new()),
/// )?;
/// handle.join();
/// # Ok::<(), weft_runtime::RuntimeError>(())
/// ```
pub fn spawn(
    executor: Arc<dyn Executor>,
    source: impl Into<String>,
    initial: Payload,
) -> Result<WorkerHandle, RuntimeError> {
    // Establish the caller's identity first so the originating context
    // keeps id 0 even when spawn is the first runtime call it makes.
    let spawner = current_id();
    let id = next_id();
    let source = source.into();

    let thread = thread::Builder::new()
        .name(format!("worker-{}", id.as_u64()))
        .spawn(move || worker_main(id, executor, source, initial))
        .map_err(|err| RuntimeError::ThreadCreateFailed {
            reason: err.to_string(),
        })?;

    debug!("{} spawned {}", spawner, id);
    Ok(WorkerHandle { id, thread })
}

/// Entry point of every worker thread.
fn worker_main(id: WorkerId, executor: Arc<dyn Executor>, source: String, initial: Payload) {
    adopt_id(id);
    let job = Job { source, initial };
    if let Err(report) = executor.execute(job) {
        warn!("{} reported an uncaught failure ({} bytes)", id, report.len());
        failure_channel().push(report);
    }
}

/// Resets the global registry and the id allocator.
///
/// Permitted only from the main context. Clears every name in
/// [`ChannelRegistry::global()`] and rewinds the allocator so the next
/// allocation yields id `1` - id `0` stays memoized with the main
/// context. Workers still running are not stopped; coordinating their
/// shutdown beforehand is the caller's responsibility.
///
/// # Errors
///
/// [`NotMainContext`](RuntimeError::NotMainContext) when called from
/// any context other than main; nothing is changed in that case.
pub fn reset() -> Result<(), RuntimeError> {
    let caller = current_id();
    if !caller.is_main() {
        return Err(RuntimeError::NotMainContext { caller });
    }
    ChannelRegistry::global().clear();
    NEXT_ID.store(1, Ordering::Relaxed);
    info!("worker lifecycle reset");
    Ok(())
}
