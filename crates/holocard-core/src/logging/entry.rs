//! One line of a JSONL log file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::Level;

/// A single log event, serialized as one JSON object per line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub ts: DateTime<Utc>,
    /// Lowercase level name (`info`, `warn`, ...)
    pub level: String,
    /// Binary that wrote the entry (`desktop`, `cli`)
    pub app: String,
    pub target: String,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    /// Enclosing span names, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<String>,
}

impl LogEntry {
    pub fn new(level: &Level, app: &str, target: &str, msg: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            level: level.as_str().to_lowercase(),
            app: app.to_string(),
            target: target.to_string(),
            msg: msg.into(),
            fields: Map::new(),
            spans: Vec::new(),
        }
    }

    pub fn is_problem(&self) -> bool {
        matches!(self.level.as_str(), "warn" | "error")
    }
}
