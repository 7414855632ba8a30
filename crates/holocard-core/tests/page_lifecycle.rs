//! Card page load, cancellation and teardown

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use holocard_core::metadata::{HeadDocument, HeadSnapshot, STRUCTURED_DATA_ID};
use holocard_core::{
    BlobRegistry, CardPage, CardResult, CardSource, CardVariant, DigitalCard, MemoryHead,
    PageState, SiteConfig, StaticCards,
};
use tokio_util::sync::CancellationToken;

/// Source whose fetch never completes
struct Hanging;

impl CardSource for Hanging {
    fn fetch<'a>(&'a self, _slug: &'a str) -> BoxFuture<'a, CardResult<DigitalCard>> {
        futures::future::pending().boxed()
    }
}

/// Source that cancels the page while the request is in flight, then
/// answers anyway
#[derive(Default)]
struct CancelsMidFlight {
    page: OnceLock<CancellationToken>,
}

impl CardSource for CancelsMidFlight {
    fn fetch<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, CardResult<DigitalCard>> {
        async move {
            if let Some(token) = self.page.get() {
                token.cancel();
            }
            Ok(DigitalCard::new(1, slug, "Late Answer"))
        }
        .boxed()
    }
}

fn page_with(source: Arc<dyn CardSource>, head: &MemoryHead, blobs: &BlobRegistry) -> CardPage<MemoryHead, BlobRegistry> {
    CardPage::new(
        source,
        Arc::new(SiteConfig::default()),
        CardVariant::Futuristic,
        head.clone(),
        blobs.clone(),
    )
}

#[tokio::test]
async fn test_cancelled_load_never_publishes() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut page = page_with(Arc::new(Hanging), &head, &blobs);
    let token = page.cancellation();

    let (state, _) = tokio::join!(
        async { page.load("ana-ruiz").await.clone() },
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        }
    );

    assert_eq!(state, PageState::Cancelled);
    assert_eq!(head.snapshot(), HeadSnapshot::default());
    assert_eq!(blobs.live_count(), 0);
}

#[tokio::test]
async fn test_result_after_cancellation_is_discarded() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let source = Arc::new(CancelsMidFlight::default());

    let mut page = page_with(source.clone(), &head, &blobs);
    source.page.set(page.cancellation()).unwrap();

    assert_eq!(page.load("ana-ruiz").await, &PageState::Cancelled);
    assert_eq!(head.title(), "");
    assert_eq!(blobs.live_count(), 0);
    assert_eq!(head.snapshot().script_count(STRUCTURED_DATA_ID), 0);
}

#[tokio::test]
async fn test_teardown_after_load_retracts() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let cards = StaticCards::new([DigitalCard::new(1, "ana-ruiz", "Ana Ruiz")]);
    let mut page = page_with(Arc::new(cards), &head, &blobs);

    assert!(matches!(page.load("ana-ruiz").await, PageState::Ready(_)));
    assert_eq!(head.title(), "🚀 Ana Ruiz [FUTURISTIC]");
    assert_eq!(
        head.canonical().as_deref(),
        Some("https://tarjeta-holografico.smartdigitaltec.com/futuristic/ana-ruiz")
    );
    assert_eq!(blobs.live_count(), 1);

    page.teardown();
    assert_eq!(page.state(), &PageState::Cancelled);
    assert_eq!(blobs.live_count(), 0);
    assert_eq!(head.snapshot().script_count(STRUCTURED_DATA_ID), 0);
}

#[tokio::test]
async fn test_reload_replaces_previous_card() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let cards = StaticCards::new([
        DigitalCard::new(1, "ana-ruiz", "Ana Ruiz"),
        DigitalCard::new(2, "beto-paz", "Beto Paz"),
    ]);
    let mut page = page_with(Arc::new(cards), &head, &blobs);

    page.load("ana-ruiz").await;
    page.load("beto-paz").await;
    assert_eq!(page.state().card().map(|c| c.id), Some(2));
    assert_eq!(blobs.live_count(), 1);
    assert_eq!(head.snapshot().script_count(STRUCTURED_DATA_ID), 1);

    page.load("missing").await;
    assert_eq!(
        page.state(),
        &PageState::NotFound("Error al cargar la tarjeta futurista".to_string())
    );
    assert_eq!(head.title(), "Tarjeta Futurista no encontrada");
    assert_eq!(blobs.live_count(), 0);
}
