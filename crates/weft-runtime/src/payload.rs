//! Opaque cross-thread payloads.
//!
//! A [`Payload`] is the unit every channel carries: a self-contained,
//! relocatable byte buffer produced by a host's value serializer. The
//! runtime never interprets the bytes; it only stores and moves the
//! handle.
//!
//! # Ownership
//!
//! `Payload` is move-only. Pushing one into a channel consumes it,
//! popping produces a fresh handle, so exactly one of
//! {producer, queue, consumer} owns a given payload at any time and no
//! two owners can read it concurrently. Releasing a payload is just
//! dropping it.

/// An opaque, heap-owned byte buffer exchanged between threads.
///
/// # Example
///
/// ```
/// use weft_runtime::Payload;
///
/// let payload = Payload::from_bytes(vec![1, 2, 3]);
/// assert_eq!(payload.len(), 3);
/// assert_eq!(payload.into_bytes().as_ref(), &[1, 2, 3]);
/// ```
pub struct Payload {
    bytes: Box<[u8]>,
}

impl Payload {
    /// Wraps serialized bytes into a payload handle.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the serialized bytes without copying.
    ///
    /// This is the hand-off back to the serializer's reconstruct step.
    #[must_use]
    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes
    }

    /// Borrows the serialized bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Contents are opaque; only the size is meaningful to the runtime.
        f.debug_struct("Payload").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let payload = Payload::from_bytes(&b"abc"[..]);
        assert_eq!(payload.as_bytes(), b"abc");
        assert_eq!(payload.into_bytes().as_ref(), b"abc");
    }

    #[test]
    fn empty_payload() {
        let payload = Payload::from_bytes(Vec::new());
        assert!(payload.is_empty());
        assert_eq!(payload.len(), 0);
    }

    #[test]
    fn debug_hides_contents() {
        let payload = Payload::from_bytes(vec![0xde, 0xad]);
        assert_eq!(format!("{payload:?}"), "Payload { len: 2 }");
    }
}
