//! Outbound frames.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// One outbound frame, discriminated by the `type` field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Outbound {
    /// Handshake: tells the client its server-assigned id. First frame on
    /// every connection.
    #[serde(rename = "INIT")]
    Init {
        #[serde(rename = "socketId")]
        socket_id: String,
    },
    /// Readiness signal, sent immediately after the handshake.
    #[serde(rename = "READY")]
    Ready,
    /// Reply to a `join`, sent to the declaring participant only.
    #[serde(rename = "JOIN_CONFIRMED")]
    JoinConfirmed { lang: String },
    /// One translated delivery for one recipient.
    #[serde(rename = "msg")]
    Msg(Envelope),
}

/// Per-recipient delivery unit: constructed, sent once, discarded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Trace id, `{prefix}_{millis}_{recipient}`. Best-effort unique; never
    /// used for dedup or ordering.
    pub id: String,
    /// Originating participant id.
    pub sender: String,
    /// Translated text, or the original text when no translation was
    /// available for the recipient's language.
    pub content: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Build a best-effort-unique trace id from a coarse wall-clock timestamp and
/// the recipient id.
pub fn trace_id(prefix: &str, recipient: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{prefix}_{millis}_{recipient}")
}
