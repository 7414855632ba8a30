//! Installable-app ("add to home screen") support.
//!
//! - [`capability`]: platform descriptor resolved once at startup
//! - [`handle`]: the platform's one-shot install prompt
//! - [`preferences`]: persisted install keys
//! - [`tracker`]: the state machine deciding when to offer installation

pub mod capability;
pub mod handle;
pub mod preferences;
pub mod tracker;

pub use capability::{Browser, DisplaySignals, Platform, PlatformCapabilities};
pub use handle::{ChannelPrompt, DeferredInstallHandle, ImmediatePrompt, InstallOutcome};
pub use preferences::InstallPreferences;
pub use tracker::{InstallState, InstallStatus, InstallabilityTracker};
