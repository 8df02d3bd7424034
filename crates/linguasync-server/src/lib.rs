//! LinguaSync relay server library.
//!
//! This crate wires the WebSocket transport, connection registry, relay
//! router, and translation gateway client into a cohesive relay stack. It is
//! intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod registry;
pub mod relay;
pub mod router;
pub mod translate;
pub mod transport;
