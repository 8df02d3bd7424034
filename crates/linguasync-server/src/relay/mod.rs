//! Relay router: per-message dispatch and translation fan-out.

pub mod router;

pub use router::Router;
