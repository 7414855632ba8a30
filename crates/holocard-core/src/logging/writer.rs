//! Append-only JSONL log file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::entry::LogEntry;

/// One log file per app per day: `{logs_dir}/{YYYY-MM-DD}_{app}.jsonl`
pub struct LogFile {
    app: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl LogFile {
    pub fn open(logs_dir: impl AsRef<Path>, app: impl Into<String>) -> std::io::Result<Self> {
        let app = app.into();
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("{}_{}.jsonl", date, app));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            app,
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry and flush
    pub fn append(&self, entry: &LogEntry) -> std::io::Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

impl Drop for LogFile {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}

/// Read every parseable entry of a log file; malformed lines are skipped
pub fn read_entries(path: impl AsRef<Path>) -> std::io::Result<Vec<LogEntry>> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Ok(entry) = serde_json::from_str::<LogEntry>(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing::Level;

    #[test]
    fn test_append_and_read_back() {
        let temp = TempDir::new().unwrap();
        let file = LogFile::open(temp.path().join("logs"), "cli").unwrap();
        file.append(&LogEntry::new(&Level::INFO, "cli", "t", "one")).unwrap();
        file.append(&LogEntry::new(&Level::WARN, "cli", "t", "two")).unwrap();

        let path = file.path().to_path_buf();
        assert!(path.to_string_lossy().ends_with("_cli.jsonl"));

        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f, "not json"))
            .unwrap();

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].msg, "two");
        assert_eq!(entries.iter().filter(|e| e.is_problem()).count(), 1);
    }
}
