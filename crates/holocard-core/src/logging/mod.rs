//! Logging setup shared by the desktop app and the CLI.
//!
//! Console output goes to stderr through `tracing_subscriber::fmt`. With a
//! logs directory configured, every event is also appended as one JSON
//! object per line:
//!
//! ```bash
//! jq 'select(.level == "warn")' logs/*_desktop.jsonl
//! ```

pub mod entry;
pub mod layer;
pub mod writer;

pub use entry::LogEntry;
pub use layer::{JsonlLayer, LoggingBuilder};
pub use writer::{read_entries, LogFile};
