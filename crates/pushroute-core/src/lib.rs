//! pushroute core: push envelope contracts, card shapes, response codes, and errors.
//!
//! This crate defines the wire-level contracts shared by the dispatch runtime,
//! centers, and tooling. It carries no runtime or executor dependencies so it
//! can be reused wherever push payloads or server responses are decoded.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `PushError`/`Result`, so a malformed push payload can never take
//! down the worker that decodes it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorCode, PushError, Result};
