//! LinguaSync core: transport-agnostic wire types and the shared error surface.
//!
//! This crate defines the inbound/outbound message contracts and error types
//! shared by the relay server and tooling. It intentionally carries no
//! transport or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `LinguaSyncError`/`Result` so the relay
//! process does not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{LinguaSyncError, Result};
