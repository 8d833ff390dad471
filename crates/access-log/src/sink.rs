use std::path::{Path, PathBuf};

use crate::entry::{AuditRecord, DecisionLabel};
use crate::writer::LogWriter;

/// Best-effort recording facade over [`LogWriter`].
///
/// Auditing must never decide whether a request is answered: every failure
/// is reduced to a `false` return plus a diagnostic, and callers discard
/// the indicator. The file is opened in append mode per record, so several
/// gate invocations can share one log file.
#[derive(Debug, Clone)]
pub struct AccessLog {
    path: PathBuf,
}

impl AccessLog {
    /// Create a handle recording to the file at `path`. Nothing is opened
    /// or created until the first record is written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one audit line for a decision on `path`. Returns whether
    /// the write succeeded; failures are logged and swallowed.
    pub fn record(&self, label: DecisionLabel, path: &str, reason: &str) -> bool {
        self.write(&AuditRecord::new(label, path, reason))
    }

    /// Append one audit line for an event with no associated path.
    pub fn record_without_path(&self, label: DecisionLabel, reason: &str) -> bool {
        self.write(&AuditRecord::without_path(label, reason))
    }

    fn write(&self, record: &AuditRecord) -> bool {
        let result = LogWriter::open(&self.path).and_then(|mut writer| writer.append(record));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to append audit record"
                );
                false
            }
        }
    }
}
