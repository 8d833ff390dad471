use regex::{Regex, RegexBuilder};

use crate::decision::Decision;
use crate::normalize::normalize_separators;
use crate::schema::Policy;

// ---------------------------------------------------------------------------
// PolicyEngine
// ---------------------------------------------------------------------------

/// The compiled form of a [`Policy`].
///
/// Construct via [`PolicyEngine::new`], which pre-compiles every blocked
/// pattern for repeated evaluation. Construction never fails: a pattern
/// that does not compile is reported through `tracing::warn!` and matches
/// nothing from then on, leaving the remaining entries in force.
pub struct PolicyEngine {
    policy: Policy,
    /// Compiled patterns parallel to `policy.blocked_patterns`; `None`
    /// marks a pattern that failed to compile.
    compiled_patterns: Vec<Option<Regex>>,
}

impl std::fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("allowed_directories", &self.policy.allowed_directories.len())
            .field("blocked_directories", &self.policy.blocked_directories.len())
            .field("blocked_patterns", &self.policy.blocked_patterns.len())
            .finish()
    }
}

impl PolicyEngine {
    /// Create a new engine from a loaded [`Policy`].
    pub fn new(policy: Policy) -> Self {
        let compiled_patterns = policy
            .blocked_patterns
            .iter()
            .map(|pattern| compile_pattern(pattern))
            .collect();
        Self {
            policy,
            compiled_patterns,
        }
    }

    /// Return a reference to the underlying policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Match a normalized path against the three rule tiers.
    ///
    /// Tiers are checked strictly in order, first hit wins:
    ///
    /// 1. allowed directory prefixes (allow)
    /// 2. blocked directory prefixes (deny)
    /// 3. blocked patterns (deny)
    /// 4. nothing matched (allow)
    ///
    /// `path` is expected to be the output of
    /// [`normalize_path`](crate::normalize::normalize_path). Directory
    /// entries are compared as plain string prefixes after separator
    /// normalization; the reason cites the entry as written in the policy.
    /// Evaluation is pure and performs no I/O.
    pub fn decide(&self, path: &str) -> Decision {
        for entry in &self.policy.allowed_directories {
            if path.starts_with(&normalize_separators(entry)) {
                return Decision::allow(format!("in allowed directory: {entry}"));
            }
        }

        for entry in &self.policy.blocked_directories {
            if path.starts_with(&normalize_separators(entry)) {
                return Decision::deny(format!("sensitive directory: {entry}"));
            }
        }

        for (entry, compiled) in self
            .policy
            .blocked_patterns
            .iter()
            .zip(&self.compiled_patterns)
        {
            if let Some(re) = compiled {
                if re.is_match(path) {
                    return Decision::deny(format!("matches restricted pattern: {entry}"));
                }
            }
        }

        Decision::allow("no restrictions matched")
    }
}

/// Compile a blocked pattern case-insensitively.
fn compile_pattern(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(
                pattern,
                error = %e,
                "failed to compile blocked pattern; treating as non-match"
            );
            None
        }
    }
}
