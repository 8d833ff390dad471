//! Built-in default rule set.
//!
//! Applied when no policy file exists at the configured location. The
//! lists mirror the deployed `restricted-patterns.json` shape: a file
//! containing exactly these entries behaves identically to no file at
//! all.

use crate::schema::Policy;

/// Regex sources denied by default: credential material, production
/// configuration, and anything under well-known secret directories.
/// Matching is case-insensitive and unanchored.
pub static DEFAULT_BLOCKED_PATTERNS: &[&str] = &[
    r".*\.env\.production.*",
    r".*\.pem$",
    r".*\.key$",
    r".*\.cert$",
    r".*production\.config.*",
    r".*/\.ssh/.*",
    r".*/\.aws/.*",
    r".*/\.azure/.*",
    r".*/\.git/config$",
    r".*secret.*",
    r".*password.*",
    r".*credential.*",
];

/// Directory prefixes denied by default.
pub static DEFAULT_BLOCKED_DIRECTORIES: &[&str] = &[
    "/etc",
    "/root",
    r"C:\Windows\System32",
    "/var/log",
];

/// Directory prefixes permitted by default. These outrank every blocked
/// entry, so workspace material stays readable even when its name trips a
/// pattern.
pub static DEFAULT_ALLOWED_DIRECTORIES: &[&str] = &[
    "./Context",
    "./References",
    "./Templates",
    "./.claude",
];

impl Policy {
    /// The built-in default policy.
    pub fn builtin() -> Self {
        Self {
            allowed_directories: to_owned(DEFAULT_ALLOWED_DIRECTORIES),
            blocked_directories: to_owned(DEFAULT_BLOCKED_DIRECTORIES),
            blocked_patterns: to_owned(DEFAULT_BLOCKED_PATTERNS),
        }
    }
}

fn to_owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}
