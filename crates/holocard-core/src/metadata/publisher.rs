//! Publishes card metadata into a document head and retracts it again.
//!
//! The publisher owns two things in the head: the structured-data script node
//! and the generated manifest resource. Everything else it writes (title,
//! meta tags, canonical link) is plain overwrite and needs no cleanup.

use std::sync::Arc;

use ulid::Ulid;

use super::document::{HeadDocument, MetaKey};
use super::manifest::AppManifest;
use super::resources::{is_generated, ResourceRegistry};
use super::seo::PageMetadata;
use super::structured::person_record;
use crate::config::SiteConfig;
use crate::types::{CardVariant, DigitalCard};

/// Id of the structured-data script node, shared by every variant
pub const STRUCTURED_DATA_ID: &str = "card-structured-data";

/// Ids older page builds used; swept on every publish
pub const LEGACY_STRUCTURED_DATA_IDS: [&str; 2] = ["structured-data", "structured-data-futuristic"];

pub const STRUCTURED_DATA_MIME: &str = "application/ld+json";
pub const MANIFEST_MIME: &str = "application/manifest+json";

const NOT_FOUND_DESCRIPTION: &str = "La tarjeta digital solicitada no está disponible.";

/// What the last `publish` wrote
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMetadata {
    pub slug: String,
    /// Tag on the structured-data node marking which publish wrote it
    pub owner: String,
    pub page: PageMetadata,
    /// Serialized JSON-LD body of the structured-data node
    pub structured_data: String,
    pub manifest: AppManifest,
    /// Generated manifest URL, if resource creation succeeded
    pub manifest_url: Option<String>,
}

/// Writes one card's metadata into a shared head
pub struct SiteMetadataPublisher<H: HeadDocument, R: ResourceRegistry> {
    config: Arc<SiteConfig>,
    variant: CardVariant,
    head: H,
    resources: R,
    published: Option<PublishedMetadata>,
    manifest_handle: Option<String>,
}

impl<H: HeadDocument, R: ResourceRegistry> SiteMetadataPublisher<H, R> {
    pub fn new(config: Arc<SiteConfig>, variant: CardVariant, head: H, resources: R) -> Self {
        Self {
            config,
            variant,
            head,
            resources,
            published: None,
            manifest_handle: None,
        }
    }

    pub fn variant(&self) -> CardVariant {
        self.variant
    }

    pub fn head(&self) -> &H {
        &self.head
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    pub fn published(&self) -> Option<&PublishedMetadata> {
        self.published.as_ref()
    }

    /// Generated manifest URL currently owned by this publisher
    pub fn manifest_handle(&self) -> Option<&str> {
        self.manifest_handle.as_deref()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Publish
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the head's card metadata with `card`'s.
    ///
    /// Never fails: a manifest that cannot be hosted is logged and the
    /// static manifest stays in place.
    pub fn publish(&mut self, card: &DigitalCard, canonical_url: &str) -> &PublishedMetadata {
        self.sweep_structured_data();

        let page = PageMetadata::for_card(card, self.variant, canonical_url, &self.config);
        self.head.set_title(&page.title);
        for (key, content) in &page.tags {
            self.head.upsert_meta(key, content);
        }
        self.head.set_canonical(&page.canonical_url);

        let record = person_record(card, self.variant, &page);
        let structured_data = record.to_string();
        let owner = Ulid::new().to_string();
        self.head.append_script(
            STRUCTURED_DATA_ID,
            STRUCTURED_DATA_MIME,
            &structured_data,
            Some(&owner),
        );

        let manifest = AppManifest::for_card(card, canonical_url, &self.config);
        let manifest_url = self.attach_manifest(&manifest);

        tracing::info!(
            slug = %card.slug,
            variant = %self.variant,
            title = %page.title,
            manifest = manifest_url.is_some(),
            "published card metadata"
        );

        self.published.insert(PublishedMetadata {
            slug: card.slug.clone(),
            owner,
            page,
            structured_data,
            manifest,
            manifest_url,
        })
    }

    /// Show "card not available" copy in place of card metadata
    pub fn publish_not_found(&mut self, reason: &str) {
        self.retract();
        self.head.set_title(self.variant.not_found_title());
        self.head
            .upsert_meta(&MetaKey::name("description"), NOT_FOUND_DESCRIPTION);
        tracing::debug!(variant = %self.variant, reason, "published not-found metadata");
    }

    fn sweep_structured_data(&self) {
        let ids = std::iter::once(STRUCTURED_DATA_ID).chain(LEGACY_STRUCTURED_DATA_IDS);
        for id in ids {
            while self.head.remove_script(id) {
                tracing::trace!(id, "removed structured-data node");
            }
        }
    }

    /// Host `manifest` as a generated resource and point the head at it.
    /// The previous handle is revoked only after the new link is attached.
    fn attach_manifest(&mut self, manifest: &AppManifest) -> Option<String> {
        let created = serde_json::to_vec(manifest)
            .map_err(crate::error::CardError::from)
            .and_then(|bytes| self.resources.create(bytes, MANIFEST_MIME));

        match created {
            Ok(url) => {
                self.head.set_manifest_href(&url);
                if let Some(previous) = self.manifest_handle.replace(url.clone()) {
                    self.revoke_generated(&previous);
                }
                Some(url)
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot host card manifest, keeping static manifest");
                self.release_manifest();
                None
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Retract
    // ═══════════════════════════════════════════════════════════════════════

    /// Remove what this publisher owns from the head. Safe to call repeatedly.
    ///
    /// Nodes another publisher has since replaced are left alone.
    pub fn retract(&mut self) {
        if let Some(published) = self.published.take() {
            let owned = self.head.script_owner(STRUCTURED_DATA_ID).as_deref()
                == Some(published.owner.as_str());
            if owned {
                self.head.remove_script(STRUCTURED_DATA_ID);
            }
            tracing::debug!(slug = %published.slug, "retracted card metadata");
        }
        self.release_manifest();
    }

    fn release_manifest(&mut self) {
        let Some(url) = self.manifest_handle.take() else {
            return;
        };
        if self.head.manifest_href().as_deref() == Some(url.as_str()) {
            match &self.config.static_manifest {
                Some(path) => self.head.set_manifest_href(path),
                None => self.head.remove_manifest(),
            }
        }
        self.revoke_generated(&url);
    }

    /// Only generated resources are revoked; plain URLs are left untouched.
    fn revoke_generated(&self, url: &str) {
        if is_generated(url) {
            self.resources.revoke(url);
        } else {
            tracing::debug!(url, "manifest is not a generated resource, nothing to revoke");
        }
    }
}

impl<H: HeadDocument, R: ResourceRegistry> Drop for SiteMetadataPublisher<H, R> {
    fn drop(&mut self) {
        self.retract();
    }
}
