use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::kernel::event::OutboundMessage;
use crate::memory::{KeyValueStore, StoreError, CHAT_HISTORY};
use crate::services::search::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<SearchResult>,
    /// Local wall-clock time, `HH:MM`.
    pub at: String,
}

impl TranscriptEntry {
    pub fn user(text: &str) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.to_string(),
            card: None,
            at: now(),
        }
    }

    pub fn assistant(message: &OutboundMessage) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: message.text.clone(),
            card: message.card.clone(),
            at: now(),
        }
    }
}

fn now() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Conversation log, persisted under `chatHistory`.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// An unreadable log is treated as empty rather than blocking startup.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let entries = store
            .get(CHAT_HISTORY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    tracing::warn!("Discarding unreadable chat history: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        Self { entries }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        store.set(CHAT_HISTORY, raw)
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
