//! Card page metadata: head tags, structured data and the per-card manifest.

pub mod document;
pub mod manifest;
pub mod publisher;
pub mod resources;
pub mod seo;
pub mod structured;

pub use document::{HeadDocument, HeadSnapshot, MemoryHead, MetaKey, ScriptNode};
pub use manifest::AppManifest;
pub use publisher::{
    PublishedMetadata, SiteMetadataPublisher, LEGACY_STRUCTURED_DATA_IDS, MANIFEST_MIME,
    STRUCTURED_DATA_ID,
};
pub use resources::{is_generated, BlobRegistry, ResourceRegistry};
pub use seo::PageMetadata;
