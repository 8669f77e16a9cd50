use serde::{Deserialize, Serialize};

/// Classified purpose of a user message, with whatever payload the matching
/// rule extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "payload")]
pub enum Intent {
    Greeting,
    Thanks,
    /// Sanitized expression, ready for the evaluator.
    Arithmetic { expression: String },
    TodoAdd { task: String },
    NotesAdd { note: String },
    Reminder { reminder: String },
    /// Default route. Carries the full trimmed input.
    WebQuery { query: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Greeting,
    Thanks,
    Arithmetic,
    TodoAdd,
    NotesAdd,
    Reminder,
    WebQuery,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Greeting => IntentKind::Greeting,
            Intent::Thanks => IntentKind::Thanks,
            Intent::Arithmetic { .. } => IntentKind::Arithmetic,
            Intent::TodoAdd { .. } => IntentKind::TodoAdd,
            Intent::NotesAdd { .. } => IntentKind::NotesAdd,
            Intent::Reminder { .. } => IntentKind::Reminder,
            Intent::WebQuery { .. } => IntentKind::WebQuery,
        }
    }

    pub fn payload(&self) -> Option<&str> {
        match self {
            Intent::Greeting | Intent::Thanks => None,
            Intent::Arithmetic { expression } => Some(expression),
            Intent::TodoAdd { task } => Some(task),
            Intent::NotesAdd { note } => Some(note),
            Intent::Reminder { reminder } => Some(reminder),
            Intent::WebQuery { query } => Some(query),
        }
    }
}
