//! `tracing` layer writing JSONL, and the subscriber builder binaries use.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::entry::LogEntry;
use super::writer::LogFile;
use crate::error::{CardError, CardResult};

/// Writes every event it sees to a [`LogFile`]
pub struct JsonlLayer {
    file: Arc<LogFile>,
}

impl JsonlLayer {
    pub fn new(logs_dir: impl AsRef<Path>, app: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self {
            file: Arc::new(LogFile::open(logs_dir, app)?),
        })
    }

    pub fn log_path(&self) -> &Path {
        self.file.path()
    }
}

impl<S> Layer<S> for JsonlLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut entry = LogEntry::new(
            metadata.level(),
            self.file.app(),
            metadata.target(),
            visitor.message.unwrap_or_default(),
        );
        entry.fields = visitor.fields;
        if let Some(scope) = ctx.event_scope(event) {
            entry.spans = scope.from_root().map(|span| span.name().to_string()).collect();
        }

        // Write errors are dropped
        let _ = self.file.append(&entry);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.message = Some(text);
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(buf, "{:?}", value);
        self.put(field, Value::String(buf));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.put(field, Value::Number(n));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, Value::String(value.to_string()));
    }
}

/// Global subscriber setup: env filter, stderr console output and an
/// optional JSONL file.
pub struct LoggingBuilder {
    app: String,
    logs_dir: Option<PathBuf>,
    console: bool,
    filter: Option<String>,
    default_filter: String,
}

impl LoggingBuilder {
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            logs_dir: None,
            console: true,
            filter: None,
            default_filter: "info".to_string(),
        }
    }

    /// Also write JSONL to `{logs_dir}/{date}_{app}.jsonl`
    pub fn with_logs_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(logs_dir.into());
        self
    }

    pub fn no_console(mut self) -> Self {
        self.console = false;
        self
    }

    /// Explicit filter directive; takes precedence over `RUST_LOG`
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter used when neither an explicit filter nor `RUST_LOG` is set
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    fn env_filter(&self) -> CardResult<EnvFilter> {
        match &self.filter {
            Some(directive) => EnvFilter::try_new(directive)
                .map_err(|e| CardError::Logging(format!("bad filter {:?}: {}", directive, e))),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&self.default_filter))),
        }
    }

    pub fn build_layer(&self) -> std::io::Result<Option<JsonlLayer>> {
        self.logs_dir
            .as_ref()
            .map(|dir| JsonlLayer::new(dir, self.app.as_str()))
            .transpose()
    }

    /// Install as the global subscriber. Returns the JSONL path, if any.
    pub fn init(self) -> CardResult<Option<PathBuf>> {
        let filter = self.env_filter()?;
        let jsonl = self.build_layer()?;
        let log_path = jsonl.as_ref().map(|l| l.log_path().to_path_buf());
        let console = self
            .console
            .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(jsonl)
            .try_init()
            .map_err(|e| CardError::Logging(e.to_string()))?;
        Ok(log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_jsonl_layer_captures_fields() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path(), "test").unwrap();
        let path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("publish");
            let span = tracing::info_span!("load");
            let _guard = span.enter();
            tracing::warn!(slug = "ana-ruiz", attempts = 2, "failed");
        });

        let entries = super::super::writer::read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "info");
        assert_eq!(entries[1].msg, "failed");
        assert_eq!(entries[1].spans, vec!["load".to_string()]);
        assert!(entries[0].fields.is_empty());
        assert_eq!(entries[1].fields["slug"], "ana-ruiz");
        assert_eq!(entries[1].fields["attempts"], 2);
    }

    #[test]
    fn test_bad_filter_rejected() {
        let builder = LoggingBuilder::new("test").with_filter("holocard=[[[");
        assert!(matches!(builder.env_filter(), Err(CardError::Logging(_))));
    }

    #[test]
    fn test_no_logs_dir_no_layer() {
        assert!(LoggingBuilder::new("test").build_layer().unwrap().is_none());
    }
}
