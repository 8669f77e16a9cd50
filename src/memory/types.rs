use serde::{Deserialize, Serialize};

use super::store::{KeyValueStore, StoreError};

pub const USER_NAME: &str = "userName";
pub const USER_LOCATION: &str = "userLocation";
pub const CHAT_HISTORY: &str = "chatHistory";
pub const TODO_LIST: &str = "todoList";
pub const USER_NOTES: &str = "userNotes";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl UserProfile {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            name: store.get(USER_NAME).filter(|s| !s.is_empty()),
            location: store.get(USER_LOCATION).filter(|s| !s.is_empty()),
        }
    }

    /// Writes non-empty fields and removes empty ones.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        for (key, value) in [(USER_NAME, &self.name), (USER_LOCATION, &self.location)] {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                Some(v) => store.set(key, v.to_string())?,
                None => store.remove(key)?,
            }
        }
        Ok(())
    }
}

/// Reads an ordered string list stored as a JSON array. A missing key is an
/// empty list.
pub fn read_list(store: &dyn KeyValueStore, key: &str) -> Result<Vec<String>, StoreError> {
    match store.get(key) {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string())),
        None => Ok(Vec::new()),
    }
}

/// Appends without deduplication.
pub fn append_to_list(
    store: &mut dyn KeyValueStore,
    key: &str,
    item: &str,
) -> Result<usize, StoreError> {
    let mut list = read_list(store, key)?;
    list.push(item.to_string());
    let raw = serde_json::to_string(&list).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.set(key, raw)?;
    Ok(list.len())
}
