//! Inbound frames, discriminated by the `type` field.

use serde::Deserialize;

use crate::error::{LinguaSyncError, Result};

/// One decoded inbound frame. Closed set; unknown tags fail to decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// Declare (or re-declare) the sender's language.
    Join { lang: String },
    /// Chat text, fanned out to every live participant.
    Chat { content: String },
    /// Document edit. `content` is itself a JSON-encoded [`DocEditPayload`].
    DocEdit { content: String },
}

impl Inbound {
    /// Decode one UTF-8 text frame. Malformed JSON and unknown tags are both
    /// reported as [`LinguaSyncError::Malformed`].
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| LinguaSyncError::Malformed(format!("invalid message json: {e}")))
    }

    /// Tag name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Inbound::Join { .. } => "join",
            Inbound::Chat { .. } => "chat",
            Inbound::DocEdit { .. } => "doc_edit",
        }
    }
}

/// Inner payload of a `doc_edit` frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEditPayload {
    /// The edit text used as translation input.
    pub content: String,
    /// Document identifier. Logged only; not propagated to recipients.
    pub doc_id: String,
}

impl DocEditPayload {
    /// Decode the inner JSON of a `doc_edit` frame. A failure here drops the
    /// whole message at the call site.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| LinguaSyncError::Malformed(format!("invalid doc_edit payload: {e}")))
    }
}
