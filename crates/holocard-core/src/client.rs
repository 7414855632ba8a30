//! Card sources: the HTTP API and an in-memory set.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::SiteConfig;
use crate::error::{CardError, CardResult};
use crate::types::{CardResponse, DigitalCard};

/// Where cards come from
pub trait CardSource: Send + Sync {
    /// Fetch a card by slug. Does not check visibility.
    fn fetch<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, CardResult<DigitalCard>>;
}

/// HTTP client for `GET {api_url}/cards/{slug}`
#[derive(Debug, Clone)]
pub struct CardClient {
    client: Client,
    api_url: Url,
}

impl CardClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(config: &SiteConfig) -> CardResult<Self> {
        Self::with_timeout(&config.api_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_url: &str, timeout: Duration) -> CardResult<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| CardError::InvalidUrl(format!("{}: {}", api_url, e)))?;
        if api_url.cannot_be_a_base() {
            return Err(CardError::InvalidUrl(api_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    /// Endpoint for one card; the slug is percent-encoded as a path segment
    pub fn endpoint(&self, slug: &str) -> CardResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| CardError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .push("cards")
            .push(slug);
        Ok(url)
    }

    pub async fn get_card(&self, slug: &str) -> CardResult<DigitalCard> {
        let url = self.endpoint(slug)?;
        tracing::debug!(%url, "fetching card");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CardError::CardNotFound(slug.to_string()));
        }
        if !status.is_success() {
            tracing::warn!(slug, status = status.as_u16(), "card API returned an error");
            return Err(CardError::Api {
                status: status.as_u16(),
            });
        }

        let body: CardResponse = response.json().await?;
        body.data
            .ok_or_else(|| CardError::CardNotFound(slug.to_string()))
    }
}

impl CardSource for CardClient {
    fn fetch<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, CardResult<DigitalCard>> {
        self.get_card(slug).boxed()
    }
}

/// Cards held in memory, keyed by slug
#[derive(Debug, Clone, Default)]
pub struct StaticCards {
    cards: HashMap<String, DigitalCard>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CardFile {
    Many(Vec<DigitalCard>),
    Envelope(CardResponse),
}

impl StaticCards {
    pub fn new(cards: impl IntoIterator<Item = DigitalCard>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.slug.clone(), c)).collect(),
        }
    }

    /// Load a JSON file holding either an array of cards or one
    /// `{ "data": card }` API response.
    pub fn load(path: impl AsRef<Path>) -> CardResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cards = match serde_json::from_str::<CardFile>(&raw)? {
            CardFile::Many(cards) => cards,
            CardFile::Envelope(response) => response.data.into_iter().collect(),
        };
        Ok(Self::new(cards))
    }

    pub fn insert(&mut self, card: DigitalCard) {
        self.cards.insert(card.slug.clone(), card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardSource for StaticCards {
    fn fetch<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, CardResult<DigitalCard>> {
        let found = self
            .cards
            .get(slug)
            .cloned()
            .ok_or_else(|| CardError::CardNotFound(slug.to_string()));
        futures::future::ready(found).boxed()
    }
}
