//! Conventional commit subject parser
//!
//! Recognises `type(scope): description` subjects where `type` is one of the
//! eleven lowercase conventional tags. The scope cannot contain `)` and the
//! description must contain at least one non-whitespace character.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::CommitParser;
use crate::types::{CommitMetadata, ConventionalType};

/// Regex for conventional commit subjects, anchored at the start of the line
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>build|chore|ci|docs|feat|fix|perf|refactor|revert|style|test)(?:\((?P<scope>[^)]+)\))?: (?P<description>.+)",
    )
    .expect("Invalid regex")
});

/// Match the first line of a message against the grammar.
///
/// Both the recognizer and the extractor go through here so they cannot
/// disagree.
fn match_subject(message: &str) -> Option<Captures<'_>> {
    let subject = message.lines().next()?;
    let caps = CONVENTIONAL_REGEX.captures(subject)?;
    if caps.name("description")?.as_str().trim().is_empty() {
        return None;
    }
    Some(caps)
}

/// Check if a commit message is a conventional commit
pub fn is_conventional_commit(message: &str) -> bool {
    match_subject(message).is_some()
}

/// Extract type, scope and description from a conventional commit message
pub fn parse_commit_message(message: &str) -> Option<CommitMetadata> {
    let caps = match_subject(message)?;

    let commit_type = caps.name("type")?.as_str().parse::<ConventionalType>().ok()?;
    let scope = caps.name("scope").map(|m| m.as_str().to_string());
    let description = caps.name("description")?.as_str().trim().to_string();

    Some(CommitMetadata {
        commit_type,
        scope,
        description,
    })
}

/// Parser for conventional commit subjects
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, message: &str) -> Option<CommitMetadata> {
        parse_commit_message(message)
    }

    fn is_conventional(&self, message: &str) -> bool {
        is_conventional_commit(message)
    }
}
