//! ChannelRegistry - process-wide named channel table.
//!
//! The registry maps unique names to shared [`Channel`] handles so that
//! workers which share no state beyond the process can still find each
//! other's queues. Names are compared by exact byte equality.
//!
//! # Ownership
//!
//! [`query()`](ChannelRegistry::query) hands out [`ChannelRef`]s that
//! keep the channel alive independently of the registry entry:
//! [`clear()`](ChannelRegistry::clear) drops the registry's references
//! unconditionally, but every handle already shared out stays fully
//! usable, while the cleared names become immediately available for
//! re-creation. Entries are never removed individually.
//!
//! # Locking
//!
//! One registry-wide [`SpinLock`] guards the map for its entire
//! lifetime. Channel internals are guarded by their own locks, so
//! traffic on one channel never contends with lookups or with other
//! channels.
//!
//! # Example
//!
//! ```
//! use weft_runtime::{ChannelRegistry, Payload};
//!
//! let registry = ChannelRegistry::new();
//! let tx = registry.create("jobs").unwrap();
//! let rx = registry.query("jobs").unwrap();
//!
//! tx.push(Payload::from_bytes(&b"job-1"[..]));
//! assert_eq!(rx.pop().unwrap().as_bytes(), b"job-1");
//!
//! // Names are unique.
//! assert!(registry.create("jobs").is_err());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::channel::queue::Channel;
use crate::error::RuntimeError;
use crate::sync::SpinLock;

/// Shared handle to a [`Channel`].
pub type ChannelRef = Arc<Channel>;

static GLOBAL: ChannelRegistry = ChannelRegistry::new();

/// Name-keyed table of shared [`Channel`] handles.
#[derive(Debug)]
pub struct ChannelRegistry {
    channels: SpinLock<BTreeMap<String, ChannelRef>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    ///
    /// Most callers want [`global()`](Self::global); standalone
    /// instances exist for hosts that scope channels themselves and for
    /// tests.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channels: SpinLock::new(BTreeMap::new()),
        }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static ChannelRegistry {
        &GLOBAL
    }

    /// Creates a new empty channel under `name`.
    ///
    /// # Returns
    ///
    /// A shared handle to the new channel, or
    /// [`DuplicateChannel`](RuntimeError::DuplicateChannel) if the name
    /// is already registered (the registry is unchanged in that case).
    pub fn create(&self, name: &str) -> Result<ChannelRef, RuntimeError> {
        let channel = {
            let mut channels = self.channels.lock();
            if channels.contains_key(name) {
                return Err(RuntimeError::DuplicateChannel {
                    name: name.to_string(),
                });
            }
            let channel: ChannelRef = Arc::new(Channel::new());
            channels.insert(name.to_string(), Arc::clone(&channel));
            channel
        };
        debug!("channel '{}' created", name);
        Ok(channel)
    }

    /// Boolean form of [`create()`](Self::create): `true` if the channel
    /// was created, `false` if the name already existed.
    pub fn try_create(&self, name: &str) -> bool {
        self.create(name).is_ok()
    }

    /// Looks up a channel by name.
    ///
    /// The returned handle keeps the channel alive independently of
    /// later [`clear()`](Self::clear) calls.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<ChannelRef> {
        let channels = self.channels.lock();
        channels.get(name).map(Arc::clone)
    }

    /// Like [`query()`](Self::query), surfacing a missing name as
    /// [`ChannelNotFound`](RuntimeError::ChannelNotFound).
    pub fn open(&self, name: &str) -> Result<ChannelRef, RuntimeError> {
        self.query(name).ok_or_else(|| RuntimeError::ChannelNotFound {
            name: name.to_string(),
        })
    }

    /// Drops every registry entry.
    ///
    /// Channels shared out to holders remain valid; only the names are
    /// forgotten.
    pub fn clear(&self) {
        let dropped = {
            let mut channels = self.channels.lock();
            let dropped = channels.len();
            channels.clear();
            dropped
        };
        info!("channel registry cleared ({} entries dropped)", dropped);
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }

    /// Returns `true` if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
