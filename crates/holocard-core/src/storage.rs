//! Durable key-value persistence.
//!
//! The install tracker only needs a handful of string keys that survive
//! restarts (the browser `localStorage` contract). `KeyValueStore` is that
//! contract; `Storage` backs it with redb for the binaries and `MemoryStore`
//! keeps it in-process for tests and ephemeral sessions.

use crate::error::CardError;
use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

mod memory;

pub use memory::MemoryStore;

/// Single string-to-string table
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// String key-value store with `localStorage` semantics
pub trait KeyValueStore: Send + Sync {
    /// Read a key. Returns `None` if it was never set or has been removed.
    fn get(&self, key: &str) -> Result<Option<String>, CardError>;

    /// Set a key, overwriting any existing value.
    fn set(&self, key: &str, value: &str) -> Result<(), CardError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CardError>;
}

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// Creates the parent directory and the `kv` table if needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CardError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    /// List every stored key/value pair, sorted by key
    pub fn entries(&self) -> Result<Vec<(String, String)>, CardError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;

        let mut entries = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            entries.push((key.value().to_string(), value.value().to_string()));
        }
        Ok(entries)
    }
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>, CardError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;

        match table.get(key)? {
            Some(v) => Ok(Some(v.value().to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CardError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CardError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::new(temp_dir.path().join("test.redb")).unwrap();

        storage.set("pwa-visited", "true").unwrap();
        assert_eq!(storage.get("pwa-visited").unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn test_overwrite_and_remove() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::new(temp_dir.path().join("test.redb")).unwrap();

        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));

        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);

        // Removing again is fine
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.redb");

        {
            let storage = Storage::new(&db_path).unwrap();
            storage.set("pwa-installed", "true").unwrap();
        }

        let storage = Storage::new(&db_path).unwrap();
        assert_eq!(
            storage.get("pwa-installed").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            storage.entries().unwrap(),
            vec![("pwa-installed".to_string(), "true".to_string())]
        );
    }
}
