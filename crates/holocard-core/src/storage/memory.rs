//! In-process key-value store.
//!
//! Clones share the same map, which lets tests simulate a page reload by
//! building a fresh tracker over a clone of the same store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::KeyValueStore;
use crate::error::CardError;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CardError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CardError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CardError> {
        self.entries.write().remove(key);
        Ok(())
    }
}
