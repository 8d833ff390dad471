/// The outcome of matching a path against the loaded policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Whether the requested access is permitted.
    pub allowed: bool,
    /// Human-readable reason citing the rule entry that decided, or the
    /// default when nothing matched.
    pub reason: String,
}

impl Decision {
    /// Convenience constructor for an allow decision.
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    /// Convenience constructor for a deny decision.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}
