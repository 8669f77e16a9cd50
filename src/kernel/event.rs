use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::search::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// One assistant reply handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub id: MessageId,
    pub text: String,
    /// Rich search card shown under the text.
    pub card: Option<SearchResult>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            card: None,
        }
    }

    pub fn with_card(text: impl Into<String>, card: SearchResult) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            card: Some(card),
        }
    }
}

/// Shortcut actions that bypass classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Weather,
    Reminder,
    Calculator,
    Todo,
    Notes,
    Joke,
}

impl Feature {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "weather" => Some(Feature::Weather),
            "reminder" => Some(Feature::Reminder),
            "calculator" | "calc" => Some(Feature::Calculator),
            "todo" => Some(Feature::Todo),
            "notes" => Some(Feature::Notes),
            "joke" => Some(Feature::Joke),
            _ => None,
        }
    }
}
