//! HoloCard Core Library
//!
//! Public digital business cards: fetch a card, publish its page metadata,
//! and decide when to offer installing the page as an app.
//!
//! ## Overview
//!
//! A card page loads a [`DigitalCard`] by slug, checks it is publicly
//! viewable, and hands it to a [`SiteMetadataPublisher`] that writes title,
//! social-preview tags, JSON-LD structured data and a per-card manifest into
//! the page head. Separately, the [`InstallabilityTracker`] answers whether the
//! "install this card" affordance should be shown right now.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use holocard_core::{BlobRegistry, CardClient, CardPage, CardVariant, MemoryHead, SiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(SiteConfig::default());
//!     let client = Arc::new(CardClient::new(&config)?);
//!     let head = MemoryHead::new();
//!
//!     let mut page = CardPage::new(
//!         client,
//!         config,
//!         CardVariant::Classic,
//!         head.clone(),
//!         BlobRegistry::new("https://tarjeta-holografico.smartdigitaltec.com"),
//!     );
//!     page.load("ana-ruiz").await;
//!     println!("{}", head.to_html());
//!
//!     page.teardown();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod metadata;
pub mod page;
pub mod storage;
pub mod types;

// Re-exports
pub use client::{CardClient, CardSource, StaticCards};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SiteConfig;
pub use error::{CardError, CardResult};
pub use install::{
    DeferredInstallHandle, DisplaySignals, InstallOutcome, InstallState, InstallStatus,
    InstallabilityTracker, PlatformCapabilities,
};
pub use metadata::{
    AppManifest, BlobRegistry, HeadDocument, MemoryHead, MetaKey, PublishedMetadata,
    ResourceRegistry, SiteMetadataPublisher,
};
pub use page::{CardPage, PageState};
pub use storage::{KeyValueStore, MemoryStore, Storage};
pub use types::{CardVariant, DigitalCard};
