//! Card page controller.
//!
//! Binds one card page view to its metadata: load fetches the card and
//! publishes it, teardown cancels any in-flight load and retracts. A load
//! cancelled mid-flight never touches the head.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::CardSource;
use crate::config::SiteConfig;
use crate::error::CardError;
use crate::metadata::{HeadDocument, PublishedMetadata, ResourceRegistry, SiteMetadataPublisher};
use crate::types::{CardVariant, DigitalCard};

/// What the page is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Idle,
    Loading,
    Ready(Box<DigitalCard>),
    /// User-facing reason the card cannot be shown
    NotFound(String),
    Cancelled,
}

impl PageState {
    pub fn card(&self) -> Option<&DigitalCard> {
        match self {
            PageState::Ready(card) => Some(card),
            _ => None,
        }
    }
}

/// One public card page view
pub struct CardPage<H: HeadDocument, R: ResourceRegistry> {
    source: Arc<dyn CardSource>,
    config: Arc<SiteConfig>,
    publisher: SiteMetadataPublisher<H, R>,
    cancel: CancellationToken,
    state: PageState,
}

impl<H: HeadDocument, R: ResourceRegistry> CardPage<H, R> {
    pub fn new(
        source: Arc<dyn CardSource>,
        config: Arc<SiteConfig>,
        variant: CardVariant,
        head: H,
        resources: R,
    ) -> Self {
        let publisher = SiteMetadataPublisher::new(config.clone(), variant, head, resources);
        Self {
            source,
            config,
            publisher,
            cancel: CancellationToken::new(),
            state: PageState::Idle,
        }
    }

    pub fn variant(&self) -> CardVariant {
        self.publisher.variant()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn published(&self) -> Option<&PublishedMetadata> {
        self.publisher.published()
    }

    pub fn publisher(&self) -> &SiteMetadataPublisher<H, R> {
        &self.publisher
    }

    /// Token that aborts the current and any later load when cancelled
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fetch `slug` and publish it, or publish not-found copy on failure
    pub async fn load(&mut self, slug: &str) -> &PageState {
        let slug = slug.trim();
        if slug.is_empty() {
            return self.fail("URL no válida", &CardError::CardNotFound(String::new()));
        }
        if self.cancel.is_cancelled() {
            self.state = PageState::Cancelled;
            return &self.state;
        }

        self.state = PageState::Loading;
        let token = self.cancel.clone();
        let source = self.source.clone();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = source.fetch(slug) => Some(result),
        };

        let result = match result {
            Some(result) if !self.cancel.is_cancelled() => result,
            _ => {
                tracing::debug!(slug, "card load cancelled, discarding result");
                self.state = PageState::Cancelled;
                return &self.state;
            }
        };

        match result.and_then(|card| card.ensure_publicly_viewable().map(|_| card)) {
            Ok(card) => {
                let canonical = self.config.card_url(self.variant(), &card.slug);
                self.publisher.publish(&card, &canonical);
                self.state = PageState::Ready(Box::new(card));
            }
            Err(e @ CardError::CardNotPublic(_)) => {
                let message = match self.variant() {
                    CardVariant::Futuristic => "Esta tarjeta futurista no está disponible",
                    _ => "Esta tarjeta no está disponible públicamente",
                };
                self.fail(message, &e);
            }
            Err(e) => {
                let message = match self.variant() {
                    CardVariant::Futuristic => "Error al cargar la tarjeta futurista",
                    _ => "Error al cargar la tarjeta digital",
                };
                self.fail(message, &e);
            }
        }
        &self.state
    }

    fn fail(&mut self, message: &str, error: &CardError) -> &PageState {
        tracing::warn!(variant = %self.variant(), error = %error, "card page failed to load");
        self.publisher.publish_not_found(&error.to_string());
        self.state = PageState::NotFound(message.to_string());
        &self.state
    }

    /// Cancel in-flight loads and retract published metadata
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        self.publisher.retract();
        self.state = PageState::Cancelled;
    }
}
