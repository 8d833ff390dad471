use serde::{Deserialize, Serialize};

/// Rule lists loaded from the JSON policy file.
///
/// Every key is optional in the serialized form; a missing key leaves that
/// list empty. Order within each list is significant: the first matching
/// entry supplies the decision reason. Documents are parsed with
/// [`Policy::from_json`], which requires the top level to be a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Directory prefixes that are always permitted. These outrank both
    /// blocked lists.
    #[serde(default)]
    pub allowed_directories: Vec<String>,
    /// Directory prefixes that are denied.
    #[serde(default)]
    pub blocked_directories: Vec<String>,
    /// Regex sources tested against the whole normalized path as
    /// case-insensitive unanchored searches.
    #[serde(default)]
    pub blocked_patterns: Vec<String>,
}

impl Policy {
    /// Parse a policy document.
    ///
    /// The top level must be a JSON object. serde's derived struct format
    /// also accepts the positional sequence form, so the document shape is
    /// checked before typed decoding; otherwise an array document would
    /// decode as a live policy without a single key matching the
    /// documented shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let document: serde_json::Value = serde_json::from_str(text)?;
        if !document.is_object() {
            return Err(serde::de::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(document)
    }

    /// A policy with every list empty. Nothing matches, so every path
    /// falls through to the default allow.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no list contains any entry.
    pub fn is_empty(&self) -> bool {
        self.allowed_directories.is_empty()
            && self.blocked_directories.is_empty()
            && self.blocked_patterns.is_empty()
    }
}
