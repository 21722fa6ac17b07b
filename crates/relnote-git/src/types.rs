//! Git types

use serde::{Deserialize, Serialize};

/// A commit in the range being summarised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Revision identifier
    pub id: String,
    /// Commit subject (first line of the message)
    pub message: String,
}

impl CommitRecord {
    /// Create a new CommitRecord
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Abbreviated identifier (first 7 characters)
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

impl std::fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.message)
    }
}
