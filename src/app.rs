use std::sync::Arc;

use dioxus::prelude::*;
use holocard_core::CardVariant;
use tokio::sync::Mutex;

use crate::components::InstallDialog;
use crate::context::{open_store, start_install_session, CardServices, InstallContext, SharedTracker};
use crate::get_settings;
use crate::pages::{CardScreen, Landing, NotFoundPage};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Landing page with a slug lookup form
/// - `/tarjeta/:slug` - Classic card page
/// - `/futuristic/:slug` - Futuristic card page
/// - `/tres/:slug` - Third card design
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/tarjeta/:slug")]
    ClassicCard { slug: String },
    #[route("/futuristic/:slug")]
    FuturisticCard { slug: String },
    #[route("/tres/:slug")]
    TresCard { slug: String },
    #[route("/:..segments")]
    NotFoundPage { segments: Vec<String> },
}

impl Route {
    /// Route of a card page
    pub fn card(variant: CardVariant, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        match variant {
            CardVariant::Classic => Route::ClassicCard { slug },
            CardVariant::Futuristic => Route::FuturisticCard { slug },
            CardVariant::Tres => Route::TresCard { slug },
        }
    }
}

#[component]
fn ClassicCard(slug: String) -> Element {
    rsx! { CardScreen { key: "{slug}", slug: slug.clone(), variant: CardVariant::Classic } }
}

#[component]
fn FuturisticCard(slug: String) -> Element {
    rsx! { CardScreen { key: "{slug}", slug: slug.clone(), variant: CardVariant::Futuristic } }
}

#[component]
fn TresCard(slug: String) -> Element {
    rsx! { CardScreen { key: "{slug}", slug: slug.clone(), variant: CardVariant::Tres } }
}

/// Root application component.
///
/// Provides global styles, card services, install state, and routing.
#[component]
pub fn App() -> Element {
    let settings = use_hook(get_settings);
    let services = use_hook(|| CardServices::from_settings(&settings));
    use_context_provider(|| services.clone());

    let tracker: Signal<SharedTracker> = use_signal(|| Arc::new(Mutex::new(None)));
    let install = use_context_provider(|| InstallContext {
        tracker,
        status: Signal::new(None),
        promptable: Signal::new(false),
        answer: Signal::new(None),
        dialog_open: Signal::new(false),
    });

    // Open the preference store and start the install session on mount
    use_effect(move || {
        let data_dir = settings.data_dir.clone();
        let config = services.config.clone();
        let mut answer = install.answer;
        spawn(async move {
            let store = open_store(&data_dir);
            let (mut session, dialog_end) = start_install_session(store, &config);
            answer.set(Some(dialog_end));

            let shared = tracker();
            let mut guard = shared.lock().await;
            install.sync_from(&mut session);
            tracing::info!(state = %session.state(), "install session started");
            *guard = Some(session);
        });
    });

    // Engagement dwell time elapses without any event; re-check periodically
    use_future(move || async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            let shared = tracker();
            let mut guard = shared.lock().await;
            if let Some(ref mut session) = *guard {
                install.sync_from(session);
            }
        }
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
        InstallDialog {}
    }
}
