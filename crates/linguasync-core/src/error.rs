//! Shared error type across LinguaSync crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, LinguaSyncError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum LinguaSyncError {
    /// Frame or payload that failed to decode. Logged and dropped; never
    /// closes the connection.
    #[error("malformed message: {0}")]
    Malformed(String),
    /// Translation gateway transport or service failure for one call.
    #[error("translation failed: {0}")]
    Translation(String),
    /// Translation gateway not reachable. Fatal at startup.
    #[error("translation gateway unreachable: {0}")]
    Unreachable(String),
    /// The participant's outbound queue is gone.
    #[error("participant channel closed")]
    Closed,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}
