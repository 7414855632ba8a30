//! Install flow scenarios across sessions
//!
//! Each "session" is a fresh tracker over the same store, the way a reload
//! starts from persisted preferences.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use holocard_core::install::{ChannelPrompt, ImmediatePrompt, InstallPreferences, Platform};
use holocard_core::storage::KeyValueStore;
use holocard_core::{
    DisplaySignals, InstallOutcome, InstallState, InstallabilityTracker, ManualClock, MemoryStore,
    PlatformCapabilities, SiteConfig, Storage,
};
use tempfile::TempDir;

const ANDROID_CHROME: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/124.0 Mobile Safari/537.36";

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).unwrap()
}

fn android() -> PlatformCapabilities {
    PlatformCapabilities::detect(ANDROID_CHROME, &DisplaySignals::default(), true)
}

fn session(store: Arc<dyn KeyValueStore>, clock: &ManualClock) -> InstallabilityTracker {
    InstallabilityTracker::new(store, Arc::new(clock.clone()), android(), &SiteConfig::default())
}

// ============================================================================
// Dismissal cooldown
// ============================================================================

#[test]
fn test_dismiss_cooldown_six_and_eight_days() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let clock = ManualClock::new(t0());

    let mut first = session(store.clone(), &clock);
    first.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));
    first.record_engagement();
    assert!(first.is_promptable());

    first.dismiss();
    assert_eq!(first.state(), InstallState::Dismissed);
    assert!(!first.is_promptable());
    drop(first);

    clock.advance(Duration::days(6));
    let mut second = session(store.clone(), &clock);
    assert!(second.visited_before());
    assert_eq!(second.dismissed_at(), Some(t0()));
    second.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));
    assert!(!second.is_promptable());
    assert_eq!(second.state(), InstallState::Dismissed);
    drop(second);

    clock.advance(Duration::days(2));
    let mut third = session(store, &clock);
    assert_eq!(
        third.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting())),
        InstallState::InstallablePrompting
    );
    assert!(third.is_promptable());
}

#[test]
fn test_cooldown_expires_within_one_session() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let clock = ManualClock::new(t0());
    let mut tracker = session(store, &clock);

    tracker.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));
    tracker.record_engagement();
    tracker.dismiss();

    clock.advance(Duration::days(7) - Duration::seconds(1));
    assert!(!tracker.is_promptable());
    assert_eq!(tracker.refresh(), InstallState::Dismissed);

    clock.advance(Duration::seconds(1));
    assert!(tracker.is_promptable());
    assert_eq!(tracker.refresh(), InstallState::InstallablePrompting);
}

#[test]
fn test_custom_cooldown_from_config() {
    let config = SiteConfig {
        dismiss_cooldown_days: 1,
        ..Default::default()
    };
    let clock = ManualClock::new(t0());
    let mut tracker = InstallabilityTracker::new(
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
        android(),
        &config,
    );
    tracker.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));
    tracker.record_engagement();
    tracker.dismiss();

    clock.advance(Duration::days(1));
    assert!(tracker.is_promptable());
}

// ============================================================================
// Installation
// ============================================================================

#[test]
fn test_installed_survives_reload() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("holocard.redb");
    let clock = ManualClock::new(t0());

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(Storage::new(&db_path).unwrap());
        let mut tracker = session(store, &clock);
        tracker.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));
        tracker.on_platform_installed_signal();
        assert_eq!(tracker.state(), InstallState::Installed);
        assert!(!tracker.has_handle());
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(Storage::new(&db_path).unwrap());
    assert!(InstallPreferences::load(store.as_ref()).installed);

    let mut tracker = session(store, &clock);
    assert_eq!(tracker.state(), InstallState::Installed);

    // A late installable signal is ignored and never promptable
    tracker.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));
    tracker.record_engagement();
    assert!(!tracker.has_handle());
    assert!(!tracker.is_promptable());
}

#[tokio::test]
async fn test_prompt_without_handle_returns_false() {
    let clock = ManualClock::new(t0());
    let mut tracker = session(Arc::new(MemoryStore::new()), &clock);
    assert!(!tracker.prompt_install().await);
    assert_eq!(tracker.state(), InstallState::Unknown);

    let mut unsupported = InstallabilityTracker::new(
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
        PlatformCapabilities::unsupported(Platform::Ios),
        &SiteConfig::default(),
    );
    assert_eq!(unsupported.state(), InstallState::NotInstallable);
    assert!(!unsupported.prompt_install().await);
}

#[tokio::test]
async fn test_prompt_accept_installs() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(t0());
    let mut tracker = session(Arc::new(store.clone()), &clock);
    tracker.on_platform_installable_signal(Box::new(ImmediatePrompt::accepting()));

    assert!(tracker.prompt_install().await);
    assert_eq!(tracker.state(), InstallState::Installed);
    assert!(InstallPreferences::load(&store).installed);

    // The handle was one-shot
    assert!(!tracker.prompt_install().await);
}

#[tokio::test]
async fn test_prompt_decline_hides_and_drops_handle() {
    let clock = ManualClock::new(t0());
    let mut tracker = session(Arc::new(MemoryStore::new()), &clock);
    tracker.on_platform_installable_signal(Box::new(ImmediatePrompt::dismissing()));
    tracker.record_engagement();

    assert!(!tracker.prompt_install().await);
    assert_eq!(tracker.state(), InstallState::InstallableHidden);
    assert!(!tracker.has_handle());
    assert!(!tracker.is_promptable());
}

#[tokio::test]
async fn test_split_prompt_resolved_elsewhere() {
    let clock = ManualClock::new(t0());
    let mut tracker = session(Arc::new(MemoryStore::new()), &clock);
    let (choice, handle) = ChannelPrompt::pair();
    tracker.on_platform_installable_signal(Box::new(handle));
    tracker.record_engagement();

    let handle = tracker.begin_prompt().unwrap();
    assert!(!tracker.has_handle());

    let waiting = tokio::spawn(handle.prompt());
    choice.send(InstallOutcome::Accepted).unwrap();
    let result = waiting.await.unwrap();

    assert!(tracker.complete_prompt(result));
    assert!(tracker.is_installed());
}

#[tokio::test]
async fn test_abandoned_prompt_counts_as_decline() {
    let clock = ManualClock::new(t0());
    let mut tracker = session(Arc::new(MemoryStore::new()), &clock);
    let (choice, handle) = ChannelPrompt::pair();
    tracker.on_platform_installable_signal(Box::new(handle));
    drop(choice);

    assert!(!tracker.prompt_install().await);
    assert_eq!(tracker.state(), InstallState::InstallableHidden);
    assert!(!tracker.is_installed());
}

// ============================================================================
// Standalone detection
// ============================================================================

#[test]
fn test_standalone_session_records_install() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(t0());
    let signals = DisplaySignals {
        referrer: "android-app://com.example.twa".to_string(),
        ..Default::default()
    };
    let capabilities = PlatformCapabilities::detect(ANDROID_CHROME, &signals, true);

    let tracker = InstallabilityTracker::new(
        Arc::new(store.clone()),
        Arc::new(clock),
        capabilities,
        &SiteConfig::default(),
    );
    assert!(tracker.is_standalone_instance());
    assert_eq!(tracker.state(), InstallState::NotInstallable);
    assert!(InstallPreferences::load(&store).installed);
}
