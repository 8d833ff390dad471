use std::path::Path;

use tracing::debug;

use crate::schema::Policy;

/// Errors that can occur while loading the policy file.
#[derive(Debug, thiserror::Error)]
pub enum PolicyLoadError {
    #[error("failed to read policy file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse policy file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the effective policy came from.
#[derive(Debug)]
pub enum PolicySource {
    /// Parsed from the policy file on disk.
    File,
    /// No file exists at the configured location; the built-in defaults
    /// apply.
    BuiltinDefault,
    /// The file exists but could not be read or parsed. The effective
    /// policy is empty, so every path falls through to the default allow,
    /// and the error is carried for the caller to report.
    EmptyFallback(PolicyLoadError),
}

/// The result of [`load_policy`]: an always-usable policy plus its origin.
#[derive(Debug)]
pub struct LoadedPolicy {
    pub policy: Policy,
    pub source: PolicySource,
}

/// Load the policy from `path`.
///
/// Never fails. A missing file yields the built-in defaults; an unreadable
/// or malformed file yields the empty policy with the error attached, so
/// the caller can record what happened and still answer the request.
pub fn load_policy(path: &Path) -> LoadedPolicy {
    if !path.exists() {
        debug!(
            path = %path.display(),
            "policy file not found; using built-in defaults"
        );
        return LoadedPolicy {
            policy: Policy::builtin(),
            source: PolicySource::BuiltinDefault,
        };
    }

    match read_policy(path) {
        Ok(policy) => LoadedPolicy {
            policy,
            source: PolicySource::File,
        },
        Err(e) => LoadedPolicy {
            policy: Policy::empty(),
            source: PolicySource::EmptyFallback(e),
        },
    }
}

fn read_policy(path: &Path) -> Result<Policy, PolicyLoadError> {
    let contents = std::fs::read_to_string(path)?;
    let policy = Policy::from_json(&contents)?;
    Ok(policy)
}
