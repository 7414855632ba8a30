//! Temporary generated resources (`blob:` URLs).
//!
//! A generated resource lives until it is revoked. Anything that creates one
//! owns it and must revoke it on replacement or teardown.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use ulid::Ulid;

use crate::error::CardResult;

/// Scheme prefix of generated, non-persistent resources
pub const GENERATED_SCHEME: &str = "blob:";

/// True if `url` points at a generated resource that must be revoked
pub fn is_generated(url: &str) -> bool {
    url.starts_with(GENERATED_SCHEME)
}

/// Creates and revokes temporary resource URLs
pub trait ResourceRegistry: Send + Sync {
    fn create(&self, bytes: Vec<u8>, mime: &str) -> CardResult<String>;
    /// Revoke a URL. Unknown or already-revoked URLs are ignored.
    fn revoke(&self, url: &str);
}

#[derive(Debug, Clone)]
struct Blob {
    mime: String,
    bytes: Vec<u8>,
}

/// In-process blob store; clones share the same live set
#[derive(Debug, Clone)]
pub struct BlobRegistry {
    origin: String,
    blobs: Arc<RwLock<HashMap<String, Blob>>>,
}

impl BlobRegistry {
    /// `origin` is embedded in generated URLs (`blob:{origin}/{id}`)
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            blobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of URLs created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.blobs.read().contains_key(url)
    }

    /// MIME type and contents of a live resource
    pub fn get(&self, url: &str) -> Option<(String, Vec<u8>)> {
        self.blobs
            .read()
            .get(url)
            .map(|b| (b.mime.clone(), b.bytes.clone()))
    }
}

impl ResourceRegistry for BlobRegistry {
    fn create(&self, bytes: Vec<u8>, mime: &str) -> CardResult<String> {
        let url = format!(
            "{}{}/{}",
            GENERATED_SCHEME,
            self.origin,
            Ulid::new().to_string().to_lowercase()
        );
        self.blobs.write().insert(
            url.clone(),
            Blob {
                mime: mime.to_string(),
                bytes,
            },
        );
        tracing::trace!(%url, "created blob");
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        if self.blobs.write().remove(url).is_some() {
            tracing::trace!(%url, "revoked blob");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_revoke() {
        let registry = BlobRegistry::new("https://x");
        let url = registry.create(b"{}".to_vec(), "application/json").unwrap();

        assert!(url.starts_with("blob:https://x/"));
        assert!(is_generated(&url));
        assert_eq!(registry.live_count(), 1);
        assert_eq!(
            registry.get(&url),
            Some(("application/json".to_string(), b"{}".to_vec()))
        );

        registry.revoke(&url);
        registry.revoke(&url);
        assert_eq!(registry.live_count(), 0);
        assert!(!registry.is_live(&url));
    }

    #[test]
    fn test_urls_are_unique() {
        let registry = BlobRegistry::new("https://x");
        let a = registry.create(Vec::new(), "text/plain").unwrap();
        let b = registry.create(Vec::new(), "text/plain").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_static_paths_are_not_generated() {
        assert!(!is_generated("/manifest.json"));
        assert!(!is_generated("https://x/manifest.json"));
    }
}
