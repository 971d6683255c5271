//! The fatal error hierarchy for database loading and the CLI surface.
//!
//! `StackMisuse` is deliberately not a variant here: per the pattern-tree
//! invariants it indicates an implementation bug rather than a user-facing
//! condition, and is instead a `debug_assert!` inside
//! [`crate::core::pattern::PatternTree::pop_child`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("usage error: {0}")]
    UsageError(String),

    #[error("failed to read database file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
