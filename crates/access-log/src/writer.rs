use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::entry::AuditRecord;

/// Errors that can occur during access log I/O.
#[derive(Debug, thiserror::Error)]
pub enum LogWriteError {
    #[error("failed to create parent directories: {0}")]
    CreateDir(std::io::Error),

    #[error("failed to open access log file: {0}")]
    Open(std::io::Error),

    #[error("failed to write to access log: {0}")]
    Write(std::io::Error),
}

/// Append-only file writer for [`AuditRecord`] lines.
///
/// Each call to [`append`](Self::append) produces exactly one
/// newline-terminated pipe-delimited line in the output file.
pub struct LogWriter {
    file: std::fs::File,
}

impl LogWriter {
    /// Open (or create) the access log at `path` in append mode.
    ///
    /// Parent directories are created automatically if they do not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogWriteError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LogWriteError::CreateDir)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(LogWriteError::Open)?;

        Ok(Self { file })
    }

    /// Append `record` as a single line.
    pub fn append(&mut self, record: &AuditRecord) -> Result<(), LogWriteError> {
        let mut line = record.format_line();
        line.push('\n');
        self.file
            .write_all(line.as_bytes())
            .map_err(LogWriteError::Write)
    }
}
