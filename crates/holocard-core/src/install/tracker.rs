//! Installability state machine.
//!
//! ```text
//! Unknown ──signal──▶ InstallableHidden ◀──decline── InstallablePrompting
//!    │                   │       ▲                         │
//!    │                   └─gate─▶┘ (returning/engaged,     │ accept / installed signal
//!    │                            no cooldown)             ▼
//!    ├──standalone / unsupported──▶ NotInstallable      Installed
//!    └── dismiss() from any non-terminal state ──▶ Dismissed ──cooldown elapsed──▶ ...
//! ```
//!
//! The tracker owns the deferred install handle. The handle is only held while
//! the app is not installed and is discarded after a single prompt.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::capability::{Platform, PlatformCapabilities};
use super::handle::{DeferredInstallHandle, InstallOutcome};
use super::preferences::InstallPreferences;
use crate::clock::Clock;
use crate::config::SiteConfig;
use crate::error::{CardError, CardResult};
use crate::storage::KeyValueStore;

/// Where the install flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallState {
    /// No platform signal received yet
    Unknown,
    /// Cannot be installed this session (unsupported or already standalone)
    NotInstallable,
    /// Handle captured, affordance withheld for now
    InstallableHidden,
    /// Affordance should be shown
    InstallablePrompting,
    /// Installation confirmed
    Installed,
    /// User declined the affordance; cooldown running
    Dismissed,
}

impl InstallState {
    /// States the session never leaves
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstallState::NotInstallable | InstallState::Installed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallState::Unknown => "unknown",
            InstallState::NotInstallable => "not_installable",
            InstallState::InstallableHidden => "installable_hidden",
            InstallState::InstallablePrompting => "installable_prompting",
            InstallState::Installed => "installed",
            InstallState::Dismissed => "dismissed",
        }
    }
}

impl std::fmt::Display for InstallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of the install flow for status displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStatus {
    pub supported: bool,
    pub installable: bool,
    pub installed: bool,
    pub can_prompt: bool,
    pub platform: Platform,
    pub state: InstallState,
}

/// Decides whether to offer "install this app" and runs the install prompt
pub struct InstallabilityTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    capabilities: PlatformCapabilities,
    cooldown: Duration,
    engagement_dwell: Duration,
    session_started: DateTime<Utc>,
    state: InstallState,
    handle: Option<Box<dyn DeferredInstallHandle>>,
    installed: bool,
    dismissed_at: Option<DateTime<Utc>>,
    visited_before: bool,
    engaged: bool,
}

impl std::fmt::Debug for InstallabilityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallabilityTracker")
            .field("state", &self.state)
            .field("has_handle", &self.handle.is_some())
            .field("installed", &self.installed)
            .field("dismissed_at", &self.dismissed_at)
            .field("visited_before", &self.visited_before)
            .field("engaged", &self.engaged)
            .finish()
    }
}

impl InstallabilityTracker {
    /// Start a session.
    ///
    /// Loads the persisted preferences, then marks this visit so the next
    /// session counts as a returning visitor. A standalone instance is
    /// recorded as installed and short-circuits the whole tracker.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        capabilities: PlatformCapabilities,
        config: &SiteConfig,
    ) -> Self {
        let prefs = InstallPreferences::load(store.as_ref());
        let session_started = clock.now();

        let mut tracker = Self {
            store,
            clock,
            capabilities,
            cooldown: config.dismiss_cooldown(),
            engagement_dwell: config.engagement_dwell(),
            session_started,
            state: InstallState::Unknown,
            handle: None,
            installed: prefs.installed,
            dismissed_at: prefs.dismissed_at,
            visited_before: prefs.visited_before,
            engaged: prefs.interacted,
        };

        if tracker.capabilities.is_standalone_instance() {
            tracing::info!("running as an installed instance");
            if !tracker.installed {
                tracker.installed = true;
                tracker.persist(InstallPreferences::mark_installed);
            }
            tracker.state = InstallState::NotInstallable;
        } else if tracker.installed {
            tracker.state = InstallState::Installed;
        } else if !tracker.capabilities.supports_prompt {
            tracker.state = InstallState::NotInstallable;
        }

        tracker.persist(InstallPreferences::mark_visited);
        tracing::debug!(state = ?tracker.state, visited_before = tracker.visited_before, "install tracker started");
        tracker
    }

    pub fn state(&self) -> InstallState {
        self.state
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn dismissed_at(&self) -> Option<DateTime<Utc>> {
        self.dismissed_at
    }

    pub fn visited_before(&self) -> bool {
        self.visited_before
    }

    pub fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    pub fn is_standalone_instance(&self) -> bool {
        self.capabilities.is_standalone_instance()
    }

    /// Manual instructions for hosts that cannot prompt
    pub fn install_instructions(&self) -> &'static str {
        self.capabilities.install_instructions()
    }

    /// The platform reports the app is installable and hands over its
    /// one-shot prompt handle.
    pub fn on_platform_installable_signal(
        &mut self,
        handle: Box<dyn DeferredInstallHandle>,
    ) -> InstallState {
        if self.installed || self.capabilities.is_standalone_instance() {
            tracing::debug!("ignoring installable signal: already installed");
            return self.state;
        }

        // The signal itself proves the platform can prompt
        self.capabilities.supports_prompt = true;
        self.handle = Some(handle);
        self.refresh()
    }

    /// The platform confirmed the app was installed
    pub fn on_platform_installed_signal(&mut self) {
        tracing::info!("app installed");
        self.mark_installed();
    }

    /// Record a user interaction that counts toward engagement.
    ///
    /// Remembered across sessions; dwell time alone is not.
    pub fn record_engagement(&mut self) {
        if !self.engaged {
            self.engaged = true;
            self.persist(InstallPreferences::mark_interacted);
            self.refresh();
        }
    }

    /// Would the affordance be shown right now?
    ///
    /// Re-evaluated against the current clock on every call.
    pub fn is_promptable(&self) -> bool {
        self.should_offer()
    }

    /// Re-evaluate the decision and update the stored state
    pub fn refresh(&mut self) -> InstallState {
        let next = self.evaluate();
        self.transition(next);
        next
    }

    /// The user closed the affordance without installing
    pub fn dismiss(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        let now = self.clock.now();
        self.dismissed_at = Some(now);
        self.persist(|store| InstallPreferences::mark_dismissed(store, now));
        self.transition(InstallState::Dismissed);
    }

    /// Take the handle out for prompting.
    ///
    /// Pair with [`complete_prompt`](Self::complete_prompt) once the user has
    /// chosen. Fails with `PromptUnavailable` when no handle is held, or
    /// `PlatformUnsupported` when the host never had a prompt API.
    pub fn begin_prompt(&mut self) -> CardResult<Box<dyn DeferredInstallHandle>> {
        match self.handle.take() {
            Some(handle) => Ok(handle),
            None if !self.capabilities.supports_prompt => Err(CardError::PlatformUnsupported),
            None => Err(CardError::PromptUnavailable),
        }
    }

    /// Apply the result of a prompt started with
    /// [`begin_prompt`](Self::begin_prompt). Returns true if the app got
    /// installed. Platform errors count as a decline.
    pub fn complete_prompt(&mut self, result: CardResult<InstallOutcome>) -> bool {
        match result {
            Ok(InstallOutcome::Accepted) => {
                tracing::info!("user accepted the install prompt");
                self.mark_installed();
                true
            }
            Ok(InstallOutcome::Dismissed) => {
                tracing::info!("user dismissed the install prompt");
                self.after_decline();
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "install prompt failed");
                self.after_decline();
                false
            }
        }
    }

    /// Show the platform prompt and wait for the user's choice.
    ///
    /// Returns false without prompting when no handle is held.
    pub async fn prompt_install(&mut self) -> bool {
        let handle = match self.begin_prompt() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "install prompt unavailable");
                return false;
            }
        };
        let result = handle.prompt().await;
        self.complete_prompt(result)
    }

    pub fn status(&self) -> InstallStatus {
        InstallStatus {
            supported: self.capabilities.supports_prompt,
            installable: self.handle.is_some() && !self.installed,
            installed: self.installed,
            can_prompt: self.handle.is_some(),
            platform: self.capabilities.platform,
            state: self.state,
        }
    }

    fn should_offer(&self) -> bool {
        !self.installed
            && !self.capabilities.is_standalone_instance()
            && self.handle.is_some()
            && !self.within_cooldown()
            && (self.visited_before || self.is_engaged())
    }

    fn within_cooldown(&self) -> bool {
        match self.dismissed_at {
            Some(at) => self.clock.now() - at < self.cooldown,
            None => false,
        }
    }

    fn is_engaged(&self) -> bool {
        self.engaged || self.clock.now() - self.session_started >= self.engagement_dwell
    }

    fn evaluate(&self) -> InstallState {
        if self.capabilities.is_standalone_instance() {
            return InstallState::NotInstallable;
        }
        if self.installed {
            return InstallState::Installed;
        }
        if self.should_offer() {
            return InstallState::InstallablePrompting;
        }
        // A dismissal persisted by an earlier session still holds
        if self.within_cooldown()
            && (self.handle.is_some() || self.state == InstallState::Dismissed)
        {
            return InstallState::Dismissed;
        }
        match self.state {
            InstallState::Unknown | InstallState::NotInstallable if self.handle.is_none() => {
                self.state
            }
            _ => InstallState::InstallableHidden,
        }
    }

    fn after_decline(&mut self) {
        self.handle = None;
        if !self.installed {
            self.transition(InstallState::InstallableHidden);
        }
    }

    fn mark_installed(&mut self) {
        self.handle = None;
        if !self.installed {
            self.installed = true;
            self.persist(InstallPreferences::mark_installed);
        }
        if self.state != InstallState::NotInstallable {
            self.transition(InstallState::Installed);
        }
    }

    fn transition(&mut self, next: InstallState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "install state transition");
            self.state = next;
        }
    }

    fn persist<F>(&self, write: F)
    where
        F: FnOnce(&dyn KeyValueStore) -> Result<(), CardError>,
    {
        if let Err(e) = write(self.store.as_ref()) {
            tracing::warn!(error = %e, "failed to persist install preference");
        }
    }
}
