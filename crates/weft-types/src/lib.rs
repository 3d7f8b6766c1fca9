//! weft-types - Shared types for the weft runtime.
//!
//! This crate holds the small, dependency-light types shared between the
//! weft runtime and its hosts:
//!
//! - [`WorkerId`]: identity of an execution context (main or spawned)
//! - [`ErrorCode`]: unified machine-readable error interface
//!
//! Hosts embedding the runtime depend on this crate for stable types;
//! the runtime implementation lives in `weft-runtime`.

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::WorkerId;
