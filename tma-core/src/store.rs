//! Process-wide state store shared by every view.
//!
//! Created empty at bootstrap and handed to views by `Arc`; values are kept as JSON and read back
//! through serde so views can store their own typed state.

use crate::error::{Result, TmaError};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

type StateMap = BTreeMap<String, Value>;

/// Key/value application state. All access goes through `&self`.
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<StateMap>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StateMap::new()),
        }
    }

    /// Reads `key` as `T`. Returns `Ok(None)` when the key is absent and `Store` error when the stored
    /// value does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let state = self.state.read();
        match state.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| TmaError::Store(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| TmaError::Store(format!("{}: {}", key, e)))?;
        debug!(key = %key, "store set");
        self.state.write().insert(key, value);
        Ok(())
    }

    /// Removes `key`; returns true if it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.state.write().remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Drops all state (application teardown).
    pub fn clear(&self) {
        self.state.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Saved {
        day: u32,
        month: u32,
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert!(store.is_empty());
        assert_eq!(store.get::<String>("missing").unwrap(), None);
    }

    #[test]
    fn test_set_get_typed_value() {
        let store = Store::new();
        store.set("birthdate", &Saved { day: 3, month: 7 }).unwrap();
        assert_eq!(
            store.get::<Saved>("birthdate").unwrap(),
            Some(Saved { day: 3, month: 7 })
        );
        assert!(store.contains("birthdate"));
        assert_eq!(store.keys(), vec!["birthdate".to_string()]);
    }

    #[test]
    fn test_get_with_wrong_type_is_store_error() {
        let store = Store::new();
        store.set("count", &5u32).unwrap();
        let err = store.get::<Saved>("count").unwrap_err();
        assert!(matches!(err, TmaError::Store(_)));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = Store::new();
        store.set("a", &1).unwrap();
        store.set("b", &2).unwrap();
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
    }
}
