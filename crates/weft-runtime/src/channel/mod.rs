//! Channels and the named-channel registry.
//!
//! - [`Channel`]: unbounded FIFO of [`Payload`](crate::Payload)s with
//!   non-blocking, blocking and timed consumption
//! - [`ChannelRegistry`]: process-wide name→channel table;
//!   [`ChannelRef`] handles outlive their registry entries

mod queue;
mod registry;

pub use queue::Channel;
pub use registry::{ChannelRef, ChannelRegistry};
