//! Top-level facade crate for LinguaSync.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use linguasync_core::*;
}

pub mod server {
    pub use linguasync_server::*;
}
