//! # path-policy
//!
//! Decision core for the file-warden gate. This crate loads the JSON rule
//! file, normalizes requested paths, and matches them against allowed
//! directory prefixes, blocked directory prefixes, and blocked regex
//! patterns, in that precedence order.
//!
//! ## Quick start
//!
//! ```rust
//! use path_policy::{normalize_path, Policy, PolicyEngine};
//!
//! let engine = PolicyEngine::new(Policy::builtin());
//! let decision = engine.decide(&normalize_path("/etc/passwd"));
//! assert!(!decision.allowed);
//! assert_eq!(decision.reason, "sensitive directory: /etc");
//! ```

mod decision;
pub mod defaults;
mod engine;
pub mod loader;
pub mod normalize;
mod schema;

// Re-export primary public API at crate root.
pub use decision::Decision;
pub use engine::PolicyEngine;
pub use loader::{load_policy, LoadedPolicy, PolicyLoadError, PolicySource};
pub use normalize::{normalize_path, normalize_separators};
pub use schema::Policy;
