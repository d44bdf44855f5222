//! Shared store — the per-session key-value map.
//!
//! One store is created when a resource becomes active and discarded when
//! the session ends, so keys written during a session are visible to every
//! hook invocation of that session and to nothing else. Writes never
//! notify; see the bus module for the write-then-emit convention.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Mutable key→value map shared by the hook invocations of one session.
#[derive(Debug, Default)]
pub struct SharedStore {
    /// The backing map.
    data: Mutex<HashMap<String, serde_json::Value>>,
}

impl SharedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value by key.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.get(key).cloned()
    }

    /// Writes a value, returning the previous one if present.
    pub fn set(&self, key: &str, value: serde_json::Value) -> Option<serde_json::Value> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.insert(key.to_string(), value)
    }

    /// Removes a key, returning its value if present.
    pub fn remove(&self, key: &str) -> Option<serde_json::Value> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.remove(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_roundtrip() {
        let store = SharedStore::new();
        assert!(store.get("zoom").is_none());
        store.set("zoom", json!(1.5));
        assert_eq!(store.get("zoom"), Some(json!(1.5)));
    }

    #[test]
    fn test_set_returns_previous_value() {
        let store = SharedStore::new();
        assert_eq!(store.set("zoom", json!(1.0)), None);
        assert_eq!(store.set("zoom", json!(2.0)), Some(json!(1.0)));
    }

    #[test]
    fn test_remove() {
        let store = SharedStore::new();
        store.set("zoom", json!(1.0));
        assert_eq!(store.remove("zoom"), Some(json!(1.0)));
        assert!(store.is_empty());
    }
}
