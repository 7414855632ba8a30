//! Shared services for the HoloCard desktop app.
//!
//! The card source, site config, page head and install tracker are created
//! once in [`App`](crate::app::App) and reached from components through the
//! hooks below.
//!
//! ## Usage
//!
//! ```ignore
//! let services = use_services();
//! let install = use_install();
//!
//! if let Some(ref tracker) = *install.tracker.read().lock().await {
//!     tracing::info!(state = %tracker.state(), "install state");
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use dioxus::prelude::*;
use holocard_core::install::ChannelPrompt;
use holocard_core::{
    BlobRegistry, CardClient, CardSource, DisplaySignals, InstallOutcome, InstallStatus,
    InstallabilityTracker, KeyValueStore, MemoryHead, MemoryStore, PlatformCapabilities,
    SiteConfig, StaticCards, Storage, SystemClock,
};
use tokio::sync::{oneshot, Mutex};

use crate::LaunchSettings;

/// Tracker shared between the install banner and the card pages.
///
/// `None` until the preference store has been opened.
pub type SharedTracker = Arc<Mutex<Option<InstallabilityTracker>>>;

/// Everything a card page needs to load and publish a card
#[derive(Clone)]
pub struct CardServices {
    pub config: Arc<SiteConfig>,
    pub source: Arc<dyn CardSource>,
    /// Head the pages publish into; previewed in the metadata panel
    pub head: MemoryHead,
    pub blobs: BlobRegistry,
    /// Card to open on startup; taken by the first landing render
    pub initial_slug: Signal<Option<String>>,
}

impl CardServices {
    pub fn from_settings(settings: &LaunchSettings) -> Self {
        let config = Arc::new(settings.config.clone());
        let source: Arc<dyn CardSource> = match &settings.card_file {
            Some(path) => match StaticCards::load(path) {
                Ok(cards) => {
                    tracing::info!(path = %path.display(), count = cards.len(), "serving cards from file");
                    Arc::new(cards)
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "cannot read card file");
                    Arc::new(StaticCards::default())
                }
            },
            None => match CardClient::new(&config) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    tracing::error!(error = %e, "invalid card API url, no cards will load");
                    Arc::new(StaticCards::default())
                }
            },
        };

        Self {
            blobs: BlobRegistry::new(config.site_url.clone()),
            head: MemoryHead::new(),
            config,
            source,
            initial_slug: Signal::new(settings.initial_slug.clone()),
        }
    }
}

/// Install affordance state shared through context
#[derive(Clone, Copy)]
pub struct InstallContext {
    pub tracker: Signal<SharedTracker>,
    /// Last status read from the tracker
    pub status: Signal<Option<InstallStatus>>,
    pub promptable: Signal<bool>,
    /// The dialog's end of the install prompt handle
    pub answer: Signal<Option<oneshot::Sender<InstallOutcome>>>,
    pub dialog_open: Signal<bool>,
}

impl InstallContext {
    /// Copy the tracker's current decision into the signals
    pub fn sync_from(mut self, tracker: &mut InstallabilityTracker) {
        tracker.refresh();
        self.status.set(Some(tracker.status()));
        self.promptable.set(tracker.is_promptable());
    }
}

/// Open the preference store, falling back to memory when it is locked or
/// unreadable.
pub fn open_store(data_dir: &Path) -> Arc<dyn KeyValueStore> {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        tracing::warn!(dir = %data_dir.display(), error = %e, "cannot create data dir");
    }
    match Storage::new(data_dir.join("holocard.redb")) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "preferences will not persist this session");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Start an install session for the desktop shell.
///
/// The shell can always install, so the installable signal is raised right
/// away with a handle answered by the install dialog. Returns the tracker
/// and the dialog's end of the channel.
pub fn start_install_session(
    store: Arc<dyn KeyValueStore>,
    config: &SiteConfig,
) -> (InstallabilityTracker, oneshot::Sender<InstallOutcome>) {
    let user_agent = format!("HoloCard Desktop ({})", std::env::consts::OS);
    let capabilities = PlatformCapabilities::detect(&user_agent, &DisplaySignals::default(), true);
    let mut tracker = InstallabilityTracker::new(store, Arc::new(SystemClock), capabilities, config);

    let (answer, handle) = ChannelPrompt::pair();
    tracker.on_platform_installable_signal(Box::new(handle));
    (tracker, answer)
}

pub fn use_services() -> CardServices {
    use_context::<CardServices>()
}

pub fn use_install() -> InstallContext {
    use_context::<InstallContext>()
}
