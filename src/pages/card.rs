//! Public card page, shared by all three variants.
//!
//! Mounting loads the card and publishes its metadata into the shared head.
//! Unmounting cancels an in-flight load and retracts what was published, so
//! the next page starts from a clean head.

use std::sync::Arc;

use dioxus::prelude::*;
use holocard_core::metadata::seo::resolve_image_url;
use holocard_core::{CardPage, CardVariant, HeadDocument, PageState};
use tokio::sync::Mutex;

use crate::app::Route;
use crate::components::{CardView, HeadPreview, InstallBanner};
use crate::context::{use_install, use_services};

#[component]
pub fn CardScreen(slug: String, variant: CardVariant) -> Element {
    let services = use_services();
    let install = use_install();
    let mut state = use_signal(|| PageState::Loading);
    let mut head_html = use_signal(String::new);

    let (page, cancel) = use_hook(|| {
        let page = CardPage::new(
            services.source.clone(),
            services.config.clone(),
            variant,
            services.head.clone(),
            services.blobs.clone(),
        );
        let cancel = page.cancellation();
        (Arc::new(Mutex::new(page)), cancel)
    });

    {
        let page = page.clone();
        let head = services.head.clone();
        use_effect(move || {
            let page = page.clone();
            let head = head.clone();
            let slug = slug.clone();
            spawn(async move {
                let mut page = page.lock().await;
                let next = page.load(&slug).await.clone();
                if next != PageState::Cancelled {
                    dioxus::desktop::window().set_title(&head.title());
                }
                head_html.set(head.to_html());
                state.set(next);
            });
        });
    }

    use_drop(move || {
        cancel.cancel();
        // A load still holding the lock retracts when its page is dropped
        if let Ok(mut page) = page.try_lock() {
            page.teardown();
        }
    });

    let engage = move |_| {
        spawn(async move {
            let shared = install.tracker.read().clone();
            let mut guard = shared.lock().await;
            if let Some(ref mut tracker) = *guard {
                tracker.record_engagement();
                install.sync_from(tracker);
            }
        });
    };

    let body = match state() {
        PageState::Idle | PageState::Loading => rsx! {
            div { class: "card-loading",
                div { class: "spinner" }
                p { "Cargando tarjeta..." }
            }
        },
        PageState::Ready(card) => {
            let card_url = services.config.card_url(variant, &card.slug);
            let photo_url = card
                .photo()
                .map(|photo| resolve_image_url(Some(photo), &services.config))
                .unwrap_or_default();
            rsx! {
                CardView { card: *card, variant, card_url, photo_url }
                InstallBanner {}
                HeadPreview { html: head_html() }
            }
        }
        PageState::NotFound(message) => rsx! {
            div { class: "card-missing",
                h1 { class: "page-title", "{variant.not_found_title()}" }
                p { class: "body-text", "{message}" }
                Link { class: "btn-secondary", to: Route::Landing {}, "Volver al inicio" }
            }
        },
        PageState::Cancelled => rsx! {},
    };

    rsx! {
        main { class: "card-page variant-{variant}", onclick: engage,
            {body}
        }
    }
}
