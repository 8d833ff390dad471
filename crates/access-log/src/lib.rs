//! Pipe-delimited audit logging for the file-warden gate.
//!
//! Every decision the gate makes is appended to a plain-text access log,
//! one line per event:
//!
//! ```text
//! 2026-08-25T14:03:51.120934Z | DENY | /etc/passwd | sensitive directory: /etc
//! ```
//!
//! Writing is best-effort: failures surface as a discarded boolean plus a
//! diagnostic, never as an error, and the request is answered either way.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use access_log::{AccessLog, DecisionLabel};
//!
//! let log = AccessLog::new("access.log");
//! let _ = log.record(DecisionLabel::Deny, "/etc/passwd", "sensitive directory: /etc");
//! ```

pub mod entry;
pub mod sink;
pub mod writer;

// Re-export primary public types at the crate root for convenience.
pub use entry::{AuditRecord, DecisionLabel};
pub use sink::AccessLog;
pub use writer::{LogWriteError, LogWriter};
