//! Audit sinks: the durable JSONL file log and an in-memory test double.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::entry::AuditEntry;
use crate::error::{AuditError, AuditResult};

/// Destination for audit entries.
///
/// Implementations must be thread-safe. Entries from a single caller are
/// appended in the order recorded; interleaving across concurrent callers
/// is whatever order the single writer serializes them into.
pub trait AuditSink: Send + Sync {
    /// Append one entry.
    ///
    /// Never fails from the caller's point of view: a write problem is
    /// reported to the operational log and otherwise swallowed, so that a
    /// logging failure cannot veto an already-authorized action.
    fn record(&self, entry: &AuditEntry);
}

/// Durable audit log: newline-delimited JSON, append-only, single writer.
pub struct FileAuditLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileAuditLog {
    /// Open (or create) the log file for appending.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> AuditResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn record(&self, entry: &AuditEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(tool = %entry.tool, "failed to serialize audit entry: {e}");
                return;
            },
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            tracing::warn!(
                path = %self.path.display(),
                tool = %entry.tool,
                "failed to append audit entry: {e}"
            );
        }
    }
}

impl std::fmt::Debug for FileAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAuditLog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// In-memory sink for tests and inspection.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    /// Create an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the recorded entries, in record order.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditSink for MemoryAuditLog {
    fn record(&self, entry: &AuditEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }
}

/// Parse a JSONL audit file back into entries.
///
/// For forensics and export tooling; the file itself must never be
/// rewritten in place.
///
/// # Errors
///
/// Returns [`AuditError::Read`] if the file cannot be read and
/// [`AuditError::Malformed`] on the first unparseable line.
pub fn read_entries(path: impl AsRef<Path>) -> AuditResult<Vec<AuditEntry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AuditError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| AuditError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let entry =
            serde_json::from_str(&line).map_err(|source| AuditError::Malformed {
                line: index.saturating_add(1),
                source,
            })?;
        entries.push(entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AuditOutcome;
    use serde_json::json;
    use warden_core::RiskLevel;

    fn sample(tool: &str, outcome: AuditOutcome) -> AuditEntry {
        AuditEntry::new(tool, json!({"path": "/work/x"}), RiskLevel::Low, outcome)
    }

    #[test]
    fn test_file_log_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = FileAuditLog::open(&path).unwrap();

        log.record(&sample("read_file", AuditOutcome::Allowed));
        log.record(&sample("write_file", AuditOutcome::Approved));
        log.record(&sample("delete_file", AuditOutcome::Rejected));

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tool, "read_file");
        assert_eq!(entries[1].tool, "write_file");
        assert_eq!(entries[2].tool, "delete_file");
        assert_eq!(entries[2].outcome, AuditOutcome::Rejected);
    }

    #[test]
    fn test_file_log_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let log = FileAuditLog::open(&path).unwrap();
            log.record(&sample("read_file", AuditOutcome::Allowed));
        }
        {
            // Appends, never truncates.
            let log = FileAuditLog::open(&path).unwrap();
            log.record(&sample("run_command", AuditOutcome::Denied));
        }

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_memory_log_order() {
        let log = MemoryAuditLog::new();
        log.record(&sample("a", AuditOutcome::Allowed));
        log.record(&sample("b", AuditOutcome::Timeout));

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tool, "a");
        assert_eq!(entries[1].outcome, AuditOutcome::Timeout);
    }

    #[test]
    fn test_read_entries_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        std::fs::write(&path, "{\"not\": \"an entry\"\n").unwrap();

        let err = read_entries(&path).unwrap_err();
        assert!(matches!(err, AuditError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_open_failure_is_an_error() {
        let err = FileAuditLog::open("/nonexistent-root-dir/audit.jsonl").unwrap_err();
        assert!(matches!(err, AuditError::Open { .. }));
    }
}
