use crate::scoring::ScoreResult;
use chrono::{DateTime, Local};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// One finished attempt as stored in the history file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Local>,
    #[serde(rename = "time_limit_secs")]
    pub time_limit_seconds: u64,
    #[serde(rename = "wpm")]
    pub speed_wpm: f64,
    #[serde(rename = "accuracy")]
    pub accuracy_pct: f64,
}

impl LogEntry {
    pub fn new(time_limit_seconds: u64, result: ScoreResult) -> Self {
        Self {
            recorded_at: Local::now(),
            time_limit_seconds,
            speed_wpm: result.speed_wpm,
            accuracy_pct: result.accuracy_pct,
        }
    }
}

/// Append-only csv history of attempts
#[derive(Debug, Clone)]
pub struct AttemptLog {
    path: PathBuf,
}

impl AttemptLog {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &LogEntry) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(entry).map_err(io::Error::other)?;
        writer.flush()
    }

    /// The most recent `n` entries, oldest first. Unreadable history reads as empty.
    pub fn last(&self, n: usize) -> Vec<LogEntry> {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("attempt history unavailable at {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let entries: Vec<LogEntry> = reader
            .deserialize::<LogEntry>()
            .filter_map(|row| match row {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping unreadable history row: {}", e);
                    None
                }
            })
            .collect();

        let skip = entries.len().saturating_sub(n);
        entries.into_iter().skip(skip).collect()
    }
}
