//! Commit subject parsing

mod conventional;

pub use conventional::{is_conventional_commit, parse_commit_message, ConventionalParser};

use crate::types::CommitMetadata;

/// Trait for commit subject parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit subject into structured metadata
    fn parse(&self, message: &str) -> Option<CommitMetadata>;

    /// Check whether a subject follows the parser's grammar
    fn is_conventional(&self, message: &str) -> bool {
        self.parse(message).is_some()
    }
}
