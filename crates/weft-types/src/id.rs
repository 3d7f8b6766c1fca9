//! Identifier types for weft.
//!
//! Worker identities are small monotonically assigned integers rather
//! than random identifiers: they are allocated by a single process-wide
//! counter and compared constantly on hot paths (context checks, log
//! correlation), where an integer is both cheaper and more readable.

use serde::{Deserialize, Serialize};

/// Identity of an execution context (a worker thread or the main context).
///
/// Ids are handed out by the runtime's allocator in strictly increasing
/// order and are never reused until an explicit reset. A context never
/// chooses its own id.
///
/// # Main context
///
/// Id `0` is reserved for the process's originating, non-spawned
/// execution context. It is assigned lazily the first time any context
/// identity is queried and stays fixed for the life of that context.
///
/// # Example
///
/// ```
/// use weft_types::WorkerId;
///
/// let main = WorkerId::MAIN;
/// assert!(main.is_main());
/// assert_eq!(main.as_u64(), 0);
///
/// let worker = WorkerId::new(3);
/// assert!(!worker.is_main());
/// assert_eq!(worker.to_string(), "worker:3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(u64);

impl WorkerId {
    /// The originating, non-spawned execution context.
    pub const MAIN: WorkerId = WorkerId(0);

    /// Wraps a raw id value.
    ///
    /// Ids are normally produced by the runtime allocator; constructing
    /// one directly is intended for tests and host bindings that round-trip
    /// ids through a foreign boundary.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the main context's id.
    #[must_use]
    pub const fn is_main(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "worker:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_id_is_zero() {
        assert_eq!(WorkerId::MAIN, WorkerId::new(0));
        assert!(WorkerId::MAIN.is_main());
        assert!(!WorkerId::new(1).is_main());
    }

    #[test]
    fn ids_order_by_raw_value() {
        let a = WorkerId::new(1);
        let b = WorkerId::new(2);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn display_format() {
        assert_eq!(WorkerId::new(7).to_string(), "worker:7");
        assert_eq!(WorkerId::MAIN.to_string(), "worker:0");
    }
}
