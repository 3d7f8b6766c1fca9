//! The process-wide failure channel.
//!
//! Workers whose executor reports an uncaught failure have that
//! failure's serialized payload pushed here by the runtime. A
//! supervising consumer drains the channel asynchronously - typically
//! with a non-blocking [`pop`](crate::Channel::pop) poll or a
//! [`timed_pop`](crate::Channel::timed_pop) loop.
//!
//! The channel is an ordinary [`Channel`] specialized by convention: it
//! is unbounded, an unread backlog simply accumulates, and nothing ever
//! crashes because a failure went unread.

use crate::channel::Channel;

static FAILURES: Channel = Channel::new();

/// Returns the process-wide failure channel.
///
/// # Example
///
/// ```
/// use weft_runtime::worker::failure_channel;
///
/// // Nothing has failed: a poll comes back empty.
/// assert!(failure_channel().pop().is_none());
/// ```
#[must_use]
pub fn failure_channel() -> &'static Channel {
    &FAILURES
}
