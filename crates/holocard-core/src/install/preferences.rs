//! Persisted install preferences.
//!
//! Four `localStorage`-style keys, each a plain string with no schema
//! version:
//!
//! | key | value |
//! |---|---|
//! | `pwa-installed` | `"true"` |
//! | `pwa-install-dismissed` | epoch milliseconds of the last dismissal |
//! | `pwa-visited` | `"true"` |
//! | `user-interacted` | `"true"` once the visitor has interacted |

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CardError;
use crate::storage::KeyValueStore;

pub const INSTALLED_KEY: &str = "pwa-installed";
pub const DISMISSED_KEY: &str = "pwa-install-dismissed";
pub const VISITED_KEY: &str = "pwa-visited";
pub const INTERACTED_KEY: &str = "user-interacted";

/// Snapshot of the persisted install keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallPreferences {
    pub installed: bool,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub visited_before: bool,
    pub interacted: bool,
}

impl InstallPreferences {
    /// Read the keys from a store. Unreadable or malformed values are
    /// treated as unset.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            installed: read(store, INSTALLED_KEY).as_deref() == Some("true"),
            dismissed_at: read(store, DISMISSED_KEY).and_then(|raw| parse_millis(&raw)),
            visited_before: read(store, VISITED_KEY).as_deref() == Some("true"),
            interacted: read(store, INTERACTED_KEY).as_deref() == Some("true"),
        }
    }

    pub fn mark_installed(store: &dyn KeyValueStore) -> Result<(), CardError> {
        store.set(INSTALLED_KEY, "true")
    }

    pub fn mark_dismissed(store: &dyn KeyValueStore, at: DateTime<Utc>) -> Result<(), CardError> {
        store.set(DISMISSED_KEY, &at.timestamp_millis().to_string())
    }

    pub fn mark_visited(store: &dyn KeyValueStore) -> Result<(), CardError> {
        store.set(VISITED_KEY, "true")
    }

    pub fn mark_interacted(store: &dyn KeyValueStore) -> Result<(), CardError> {
        store.set(INTERACTED_KEY, "true")
    }

    /// Forget everything: the next session behaves like a first visit
    pub fn clear(store: &dyn KeyValueStore) -> Result<(), CardError> {
        for key in [INSTALLED_KEY, DISMISSED_KEY, VISITED_KEY, INTERACTED_KEY] {
            store.remove(key)?;
        }
        Ok(())
    }
}

fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read install preference");
            None
        }
    }
}

fn parse_millis(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis);
    if parsed.is_none() {
        tracing::warn!(value = raw, "ignoring malformed dismissal timestamp");
    }
    parsed
}
