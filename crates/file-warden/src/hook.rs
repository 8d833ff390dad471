//! Request adapter: the JSON envelope protocol spoken with the tool host.
//!
//! The host pipes one request envelope to stdin and reads one response
//! envelope from stdout. Only the tool name and the path argument are
//! inspected; everything else in the envelope is ignored.

use serde::{Deserialize, Serialize};

use access_log::{AccessLog, DecisionLabel};
use path_policy::{normalize_path, PolicyEngine};

/// Tools whose requests carry a path this gate rules on. Requests from
/// any other tool pass through untouched.
const PATH_BEARING_TOOLS: &[&str] = &["Read", "Write", "Edit", "MultiEdit"];

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The request envelope piped to stdin by the tool host.
#[derive(Debug, Deserialize)]
pub struct HookRequest {
    #[serde(rename = "toolName", default)]
    pub tool_name: String,
    #[serde(default)]
    pub arguments: ToolArguments,
}

/// The subset of tool arguments the gate inspects. Hosts spell the path
/// field both ways; `file_path` wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct ToolArguments {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(rename = "filePath", default)]
    pub file_path_camel: Option<String>,
}

impl ToolArguments {
    /// The effective path argument. Empty strings count as absent.
    fn file_path(&self) -> Option<&str> {
        [&self.file_path, &self.file_path_camel]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|path| !path.is_empty())
    }
}

/// The response envelope written to stdout.
#[derive(Debug, Serialize, PartialEq)]
pub struct HookResponse {
    pub decision: HookDecision,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HookDecision {
    Approve,
    Deny,
}

impl HookResponse {
    pub fn approve(reason: impl Into<String>) -> Self {
        Self {
            decision: HookDecision::Approve,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            decision: HookDecision::Deny,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request handling
// ---------------------------------------------------------------------------

/// Decide one request.
///
/// `raw` is the full stdin payload. Every response produced here is
/// paired with exactly one ALLOW or DENY line in the access log, which
/// carries the path as requested rather than its normalized form.
/// Unreadable or unparseable input is denied.
pub fn handle(raw: &str, engine: &PolicyEngine, audit: &AccessLog) -> HookResponse {
    if raw.trim().is_empty() {
        let response = HookResponse::deny("No input data received");
        let _ = audit.record_without_path(DecisionLabel::Deny, &response.reason);
        return response;
    }

    let request = match parse_request(raw) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "request envelope did not parse");
            let response = HookResponse::deny("Invalid JSON input");
            let _ = audit.record_without_path(DecisionLabel::Deny, &response.reason);
            return response;
        }
    };

    let path = if PATH_BEARING_TOOLS.contains(&request.tool_name.as_str()) {
        request.arguments.file_path()
    } else {
        None
    };

    let path = match path {
        Some(path) => path,
        None => {
            let response = HookResponse::approve("no file path to validate");
            let _ = audit.record_without_path(DecisionLabel::Allow, &response.reason);
            return response;
        }
    };

    let decision = engine.decide(&normalize_path(path));
    let label = if decision.allowed {
        DecisionLabel::Allow
    } else {
        DecisionLabel::Deny
    };
    let _ = audit.record(label, path, &decision.reason);

    if decision.allowed {
        HookResponse::approve(decision.reason)
    } else {
        HookResponse::deny(decision.reason)
    }
}

/// Parse the request envelope.
///
/// The envelope and its `arguments` field must be JSON objects. serde's
/// derived struct format also accepts the positional sequence form, so
/// the shapes are checked before typed decoding; a bare array would
/// otherwise pass as a pathless request, and a positional one would
/// carry a path into the decision.
fn parse_request(raw: &str) -> Result<HookRequest, serde_json::Error> {
    let envelope: serde_json::Value = serde_json::from_str(raw)?;
    if !envelope.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    if let Some(arguments) = envelope.get("arguments") {
        if !arguments.is_object() {
            return Err(serde::de::Error::custom(
                "expected \"arguments\" to be a JSON object",
            ));
        }
    }
    serde_json::from_value(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_policy::Policy;

    fn fixture() -> (tempfile::TempDir, PolicyEngine, AccessLog) {
        let dir = tempfile::tempdir().expect("tempdir");
        let audit = AccessLog::new(dir.path().join("access.log"));
        (dir, PolicyEngine::new(Policy::builtin()), audit)
    }

    fn log_contents(audit: &AccessLog) -> String {
        std::fs::read_to_string(audit.path()).unwrap_or_default()
    }

    // -- Policy decisions --

    #[test]
    fn read_inside_allowed_directory_approves() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {"file_path": "./Context/notes.md"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(
            response,
            HookResponse::approve("in allowed directory: ./Context")
        );
    }

    #[test]
    fn read_of_etc_passwd_denies() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {"file_path": "/etc/passwd"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::deny("sensitive directory: /etc"));
    }

    #[test]
    fn secret_bearing_name_denies_by_pattern() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Write", "arguments": {"file_path": "my-secret-notes.txt"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(
            response,
            HookResponse::deny("matches restricted pattern: .*secret.*")
        );
    }

    #[test]
    fn allowed_directory_outranks_patterns() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Edit", "arguments": {"file_path": "./Context/secret-notes.md"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(
            response,
            HookResponse::approve("in allowed directory: ./Context")
        );
    }

    #[test]
    fn paths_are_normalized_before_matching() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {"file_path": "/tmp/../etc/passwd"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::deny("sensitive directory: /etc"));
    }

    #[test]
    fn backslash_paths_are_normalized_before_matching() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {"file_path": "C:\\Windows\\System32\\drivers\\etc\\hosts"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(
            response,
            HookResponse::deny(r"sensitive directory: C:\Windows\System32")
        );
        // The log keeps the path as requested.
        assert!(log_contents(&audit).contains(r"C:\Windows\System32\drivers\etc\hosts"));
    }

    // -- Tool routing --

    #[test]
    fn each_path_bearing_tool_is_validated() {
        for tool in ["Read", "Write", "Edit", "MultiEdit"] {
            let (_dir, engine, audit) = fixture();
            let raw =
                format!(r#"{{"toolName": "{tool}", "arguments": {{"file_path": "/etc/passwd"}}}}"#);
            let response = handle(&raw, &engine, &audit);
            assert_eq!(
                response,
                HookResponse::deny("sensitive directory: /etc"),
                "tool {tool} should be validated"
            );
        }
    }

    #[test]
    fn non_path_tool_approves_without_validation() {
        let (_dir, engine, audit) = fixture();
        // Even with a blocked path in the arguments.
        let raw = r#"{"toolName": "Bash", "arguments": {"file_path": "/etc/passwd"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::approve("no file path to validate"));
    }

    #[test]
    fn missing_path_approves() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::approve("no file path to validate"));
    }

    #[test]
    fn missing_arguments_object_approves() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read"}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::approve("no file path to validate"));
    }

    #[test]
    fn empty_string_path_counts_as_absent() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {"file_path": ""}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::approve("no file path to validate"));
    }

    #[test]
    fn camel_case_spelling_is_accepted() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"toolName": "Read", "arguments": {"filePath": "/etc/hosts"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::deny("sensitive directory: /etc"));
    }

    #[test]
    fn snake_case_wins_when_both_spellings_are_present() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{
            "toolName": "Read",
            "arguments": {"file_path": "./Context/a.md", "filePath": "/etc/passwd"}
        }"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(
            response,
            HookResponse::approve("in allowed directory: ./Context")
        );
    }

    #[test]
    fn empty_snake_case_falls_through_to_camel_case() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{
            "toolName": "Read",
            "arguments": {"file_path": "", "filePath": "/etc/passwd"}
        }"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::deny("sensitive directory: /etc"));
    }

    // -- Malformed input --

    #[test]
    fn empty_input_denies() {
        let (_dir, engine, audit) = fixture();
        let response = handle("", &engine, &audit);
        assert_eq!(response, HookResponse::deny("No input data received"));
    }

    #[test]
    fn whitespace_input_denies() {
        let (_dir, engine, audit) = fixture();
        let response = handle("  \n\t ", &engine, &audit);
        assert_eq!(response, HookResponse::deny("No input data received"));
    }

    #[test]
    fn unparseable_input_denies() {
        let (_dir, engine, audit) = fixture();
        let response = handle("{ not json", &engine, &audit);
        assert_eq!(response, HookResponse::deny("Invalid JSON input"));
    }

    #[test]
    fn non_object_envelopes_deny() {
        let (_dir, engine, audit) = fixture();
        // A bare array would otherwise pass as a pathless request, and a
        // positional one would carry a path into the decision.
        for raw in ["[]", "42", r#"["Read", {"file_path": "/etc/passwd"}]"#] {
            let response = handle(raw, &engine, &audit);
            assert_eq!(
                response,
                HookResponse::deny("Invalid JSON input"),
                "input {raw} should be rejected"
            );
        }
    }

    #[test]
    fn type_mismatched_envelope_denies() {
        let (_dir, engine, audit) = fixture();
        // toolName must be a string, file_path must be a string, and
        // arguments must be an object.
        for raw in [
            r#"{"toolName": 42}"#,
            r#"{"toolName": "Read", "arguments": {"file_path": 7}}"#,
            r#"{"toolName": "Read", "arguments": "nope"}"#,
            r#"{"toolName": "Read", "arguments": ["/etc/passwd"]}"#,
        ] {
            let response = handle(raw, &engine, &audit);
            assert_eq!(
                response,
                HookResponse::deny("Invalid JSON input"),
                "input {raw} should be rejected"
            );
        }
    }

    #[test]
    fn missing_tool_name_approves_as_non_path_tool() {
        let (_dir, engine, audit) = fixture();
        let raw = r#"{"arguments": {"file_path": "/etc/passwd"}}"#;

        let response = handle(raw, &engine, &audit);
        assert_eq!(response, HookResponse::approve("no file path to validate"));
    }

    // -- Audit trail --

    #[test]
    fn every_decision_writes_one_audit_line() {
        let (_dir, engine, audit) = fixture();

        handle(
            r#"{"toolName": "Read", "arguments": {"file_path": "/etc/passwd"}}"#,
            &engine,
            &audit,
        );
        handle(
            r#"{"toolName": "Read", "arguments": {"file_path": "./Context/notes.md"}}"#,
            &engine,
            &audit,
        );
        handle("not json", &engine, &audit);
        handle(r#"{"toolName": "Bash", "arguments": {}}"#, &engine, &audit);

        let contents = log_contents(&audit);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4, "log:\n{contents}");
        assert!(lines[0].contains(" | DENY | /etc/passwd | sensitive directory: /etc"));
        assert!(lines[1].contains(" | ALLOW | ./Context/notes.md | in allowed directory: ./Context"));
        assert!(lines[2].contains(" | DENY | unknown | Invalid JSON input"));
        assert!(lines[3].contains(" | ALLOW | unknown | no file path to validate"));
    }

    // -- Response encoding --

    #[test]
    fn responses_serialize_with_lowercase_decisions() {
        let approve = serde_json::to_value(HookResponse::approve("ok")).unwrap();
        assert_eq!(
            approve,
            serde_json::json!({"decision": "approve", "reason": "ok"})
        );

        let deny = serde_json::to_value(HookResponse::deny("no")).unwrap();
        assert_eq!(deny, serde_json::json!({"decision": "deny", "reason": "no"}));
    }
}
