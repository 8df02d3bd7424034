//! Connection registry: the single source of truth for who is reachable.
//!
//! Participant entry and language live in one map slot, so the participant
//! set and the language map can never drift apart. All state is in-memory
//! and dies with the process.

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;

use linguasync_core::error::{LinguaSyncError, Result};

/// Language assumed until a participant declares one.
pub const DEFAULT_LANG: &str = "en-US";

/// One live participant: its outbound queue sender and declared language.
#[derive(Clone)]
pub struct Participant {
    pub tx: mpsc::Sender<Message>,
    pub lang: String,
}

#[derive(Default)]
pub struct Registry {
    participants: DashMap<String, Participant>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            participants: DashMap::new(),
        }
    }

    /// Add a participant with the default language. Ids are minted per
    /// connection and never reused, so a duplicate is a server bug.
    pub fn register(&self, id: &str, tx: mpsc::Sender<Message>) -> Result<()> {
        if self.participants.contains_key(id) {
            return Err(LinguaSyncError::Internal(format!(
                "participant already registered: {id}"
            )));
        }
        self.participants.insert(
            id.to_string(),
            Participant {
                tx,
                lang: DEFAULT_LANG.to_string(),
            },
        );
        Ok(())
    }

    /// Overwrite the stored language. No-op when the id is gone (the
    /// connection may have torn down between decode and dispatch).
    pub fn set_language(&self, id: &str, lang: &str) {
        if let Some(mut p) = self.participants.get_mut(id) {
            p.lang = lang.to_string();
        }
    }

    /// Remove the participant. Returns whether an entry was removed, so
    /// teardown can run twice without error.
    pub fn unregister(&self, id: &str) -> bool {
        self.participants.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<Participant> {
        self.participants.get(id).map(|p| p.value().clone())
    }

    /// Current language of a participant, falling back to the default for
    /// unknown ids.
    pub fn language_of(&self, id: &str) -> String {
        self.participants
            .get(id)
            .map(|p| p.lang.clone())
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }

    /// Point-in-time copy of the live set. Iteration order is unspecified;
    /// membership may change after the snapshot is taken.
    pub fn snapshot(&self) -> Vec<(String, Participant)> {
        self.participants
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
