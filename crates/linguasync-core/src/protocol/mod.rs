//! Wire protocol (JSON text frames).
//!
//! Inbound frames decode into a closed tagged enum so the relay router can
//! dispatch exhaustively; any tag outside the enumeration is a decode error.
//! Outbound frames serialize with the field casing clients expect
//! (`socketId`, `sourceLang`, `targetLang`).

pub mod inbound;
pub mod outbound;

pub use inbound::{DocEditPayload, Inbound};
pub use outbound::{trace_id, Envelope, Outbound};
