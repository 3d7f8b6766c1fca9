//! Runtime errors.
//!
//! All recoverable conditions are returned to the immediate caller as
//! [`RuntimeError`] values; a worker's uncaught failure is the single
//! exception and travels only through the failure channel (see
//! [`worker::failure_channel`](crate::worker::failure_channel)), never
//! as an error to the spawner and never as a process crash.
//!
//! # Error Code Convention
//!
//! All runtime errors use the `RUNTIME_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`RuntimeError::DuplicateChannel`] | `RUNTIME_DUPLICATE_CHANNEL` | No |
//! | [`RuntimeError::ChannelNotFound`] | `RUNTIME_CHANNEL_NOT_FOUND` | Yes |
//! | [`RuntimeError::ThreadCreateFailed`] | `RUNTIME_THREAD_CREATE_FAILED` | Yes |
//! | [`RuntimeError::NotMainContext`] | `RUNTIME_NOT_MAIN_CONTEXT` | No |

use thiserror::Error;
use weft_types::{ErrorCode, WorkerId};

/// Error returned by registry and worker-lifecycle operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A channel with this name already exists.
    #[error("duplicate channel '{name}'")]
    DuplicateChannel {
        /// The contested channel name.
        name: String,
    },

    /// No channel is registered under this name.
    ///
    /// Recoverable: another context may simply not have created the
    /// channel yet.
    #[error("can't query channel '{name}'")]
    ChannelNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The OS refused to create a worker thread.
    ///
    /// Carries the OS error text. The worker's source and initial
    /// payload are released before this is returned.
    #[error("thread creation failed: {reason}")]
    ThreadCreateFailed {
        /// OS-level error text.
        reason: String,
    },

    /// `reset` was invoked from a context other than main.
    #[error("reset must be called from the main context (caller: {caller})")]
    NotMainContext {
        /// Identity of the rejected caller.
        caller: WorkerId,
    },
}

impl ErrorCode for RuntimeError {
    fn code(&self) -> &'static str {
        match self {
            Self::DuplicateChannel { .. } => "RUNTIME_DUPLICATE_CHANNEL",
            Self::ChannelNotFound { .. } => "RUNTIME_CHANNEL_NOT_FOUND",
            Self::ThreadCreateFailed { .. } => "RUNTIME_THREAD_CREATE_FAILED",
            Self::NotMainContext { .. } => "RUNTIME_NOT_MAIN_CONTEXT",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // The name won't free itself; the caller holds a naming bug
            // or must wait for an explicit clear.
            Self::DuplicateChannel { .. } => false,
            // The creating context may come around later.
            Self::ChannelNotFound { .. } => true,
            // Resource pressure can clear up.
            Self::ThreadCreateFailed { .. } => true,
            // The calling context cannot change its identity.
            Self::NotMainContext { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_types::assert_error_codes;

    fn all_variants() -> Vec<RuntimeError> {
        vec![
            RuntimeError::DuplicateChannel { name: "x".into() },
            RuntimeError::ChannelNotFound { name: "x".into() },
            RuntimeError::ThreadCreateFailed {
                reason: "EAGAIN".into(),
            },
            RuntimeError::NotMainContext {
                caller: WorkerId::new(3),
            },
        ]
    }

    #[test]
    fn codes_follow_convention() {
        assert_error_codes(&all_variants(), "RUNTIME_");
    }

    #[test]
    fn recoverability() {
        for err in all_variants() {
            let expected = matches!(
                err,
                RuntimeError::ChannelNotFound { .. } | RuntimeError::ThreadCreateFailed { .. }
            );
            assert_eq!(err.is_recoverable(), expected, "{err}");
        }
    }

    #[test]
    fn messages_carry_context() {
        let err = RuntimeError::NotMainContext {
            caller: WorkerId::new(5),
        };
        assert_eq!(
            err.to_string(),
            "reset must be called from the main context (caller: worker:5)"
        );
    }
}
