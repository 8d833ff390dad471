use chrono::{DateTime, SecondsFormat, Utc};

/// The label recorded for an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionLabel {
    /// The request was approved.
    Allow,
    /// The request was denied.
    Deny,
    /// An internal failure occurred while handling the request.
    Error,
}

impl std::fmt::Display for DecisionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DecisionLabel::Allow => "ALLOW",
            DecisionLabel::Deny => "DENY",
            DecisionLabel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A single audit record: one line in the access log.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub label: DecisionLabel,
    /// The path as requested by the caller, not its normalized form, or
    /// `unknown` when the event has no path.
    pub path: String,
    pub reason: String,
}

impl AuditRecord {
    /// Create a record stamped with the current UTC time.
    pub fn new(label: DecisionLabel, path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            label,
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a record for an event with no associated path; the path
    /// column reads `unknown`.
    pub fn without_path(label: DecisionLabel, reason: impl Into<String>) -> Self {
        Self::new(label, "unknown", reason)
    }

    /// Render the pipe-delimited log line, without the trailing newline:
    ///
    /// ```text
    /// 2026-08-25T14:03:51.120934Z | DENY | /etc/passwd | sensitive directory: /etc
    /// ```
    pub fn format_line(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.label,
            self.path,
            self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_render_upper_case() {
        assert_eq!(DecisionLabel::Allow.to_string(), "ALLOW");
        assert_eq!(DecisionLabel::Deny.to_string(), "DENY");
        assert_eq!(DecisionLabel::Error.to_string(), "ERROR");
    }

    #[test]
    fn line_has_four_pipe_delimited_fields() {
        let record = AuditRecord::new(DecisionLabel::Deny, "/etc/passwd", "sensitive directory: /etc");
        let line = record.format_line();
        let fields: Vec<&str> = line.split(" | ").collect();
        assert_eq!(fields.len(), 4, "unexpected line shape: {line}");
        assert_eq!(fields[1], "DENY");
        assert_eq!(fields[2], "/etc/passwd");
        assert_eq!(fields[3], "sensitive directory: /etc");
    }

    #[test]
    fn timestamp_field_parses_back_as_rfc3339() {
        let record = AuditRecord::new(DecisionLabel::Allow, "a.txt", "no restrictions matched");
        let line = record.format_line();
        let ts = line.split(" | ").next().expect("timestamp field");
        let parsed = DateTime::parse_from_rfc3339(ts).expect("timestamp should parse");
        // The rendered form truncates to microseconds.
        assert_eq!(parsed.timestamp_micros(), record.timestamp.timestamp_micros());
    }

    #[test]
    fn without_path_fills_the_unknown_marker() {
        let record = AuditRecord::without_path(DecisionLabel::Error, "Failed to load patterns");
        assert_eq!(record.path, "unknown");
        assert!(record.format_line().contains(" | ERROR | unknown | "));
    }

    #[test]
    fn raw_paths_are_recorded_verbatim() {
        // Backslashes survive; normalization happens elsewhere.
        let record = AuditRecord::new(DecisionLabel::Deny, r"C:\Windows\System32\config", "x");
        assert!(record.format_line().contains(r"C:\Windows\System32\config"));
    }
}
