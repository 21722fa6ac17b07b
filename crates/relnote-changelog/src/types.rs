//! Release notes types

use relnote_git::CommitRecord;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Conventional commit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConventionalType {
    /// Build system
    Build,
    /// Chores (maintenance)
    Chore,
    /// CI configuration
    Ci,
    /// Documentation
    Docs,
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Performance improvement
    Perf,
    /// Refactoring
    Refactor,
    /// Reverting changes
    Revert,
    /// Code style (formatting, etc.)
    Style,
    /// Tests
    Test,
}

impl ConventionalType {
    /// Every type, in alphabetical order
    pub const ALL: [ConventionalType; 11] = [
        Self::Build,
        Self::Chore,
        Self::Ci,
        Self::Docs,
        Self::Feat,
        Self::Fix,
        Self::Perf,
        Self::Refactor,
        Self::Revert,
        Self::Style,
        Self::Test,
    ];

    /// The tag as written in commit subjects
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Chore => "chore",
            Self::Ci => "ci",
            Self::Docs => "docs",
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Revert => "revert",
            Self::Style => "style",
            Self::Test => "test",
        }
    }

    /// Glyph shown in front of the type's heading
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Build => "👷",
            Self::Chore => "🧹",
            Self::Ci => "🤖",
            Self::Docs => "📝",
            Self::Feat => "✨",
            Self::Fix => "🐛",
            Self::Perf => "⚡️",
            Self::Refactor => "♻️",
            Self::Revert => "⏪",
            Self::Style => "🎨",
            Self::Test => "✅",
        }
    }
}

impl std::fmt::Display for ConventionalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConventionalType {
    type Err = ();

    /// Exact, case-sensitive match on the lowercase tag
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Structured form of a conventional commit subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMetadata {
    /// Commit type
    #[serde(rename = "type")]
    pub commit_type: ConventionalType,
    /// Scope, without the surrounding parentheses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Description after the `type(scope): ` prefix
    pub description: String,
}

impl CommitMetadata {
    /// Create metadata without a scope
    pub fn new(commit_type: ConventionalType, description: impl Into<String>) -> Self {
        Self {
            commit_type,
            scope: None,
            description: description.into(),
        }
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Commit metadata bucketed by type.
///
/// Buckets iterate in the order they were first populated and keep their
/// items in insertion order. Types without commits have no bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedMetadata {
    buckets: Vec<(ConventionalType, Vec<CommitMetadata>)>,
}

impl GroupedMetadata {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append metadata to the bucket of its type, opening the bucket if needed
    pub fn push(&mut self, metadata: CommitMetadata) {
        match self
            .buckets
            .iter_mut()
            .find(|(t, _)| *t == metadata.commit_type)
        {
            Some((_, items)) => items.push(metadata),
            None => self.buckets.push((metadata.commit_type, vec![metadata])),
        }
    }

    /// Items of one type, if any commit had it
    pub fn get(&self, commit_type: ConventionalType) -> Option<&[CommitMetadata]> {
        self.buckets
            .iter()
            .find(|(t, _)| *t == commit_type)
            .map(|(_, items)| items.as_slice())
    }

    /// Buckets in first-populated order
    pub fn iter(&self) -> impl Iterator<Item = (ConventionalType, &[CommitMetadata])> {
        self.buckets.iter().map(|(t, items)| (*t, items.as_slice()))
    }

    /// Types present, in first-populated order
    pub fn types(&self) -> Vec<ConventionalType> {
        self.buckets.iter().map(|(t, _)| *t).collect()
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no commit was grouped
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of grouped commits across all buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, items)| items.len()).sum()
    }
}

impl Serialize for GroupedMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (commit_type, items) in &self.buckets {
            map.serialize_entry(commit_type.as_str(), items)?;
        }
        map.end()
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseNotes {
    /// Release title, also used as the tag name
    pub title: String,
    /// Rendered markdown body
    pub body: String,
    /// Every commit in the range
    pub commits: Vec<CommitRecord>,
    /// Commits kept by the relevance filter
    pub relevant: Vec<CommitRecord>,
    /// Parsed metadata grouped by type
    pub grouped: GroupedMetadata,
}

impl ReleaseNotes {
    /// Check if no relevant commit was found
    pub fn is_empty(&self) -> bool {
        self.grouped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_type_from_str() {
        assert_eq!("feat".parse::<ConventionalType>(), Ok(ConventionalType::Feat));
        assert_eq!("ci".parse::<ConventionalType>(), Ok(ConventionalType::Ci));
        assert!("Feat".parse::<ConventionalType>().is_err());
        assert!("feature".parse::<ConventionalType>().is_err());
        assert!("".parse::<ConventionalType>().is_err());
    }

    #[test]
    fn test_every_type_round_trips_through_its_tag() {
        for commit_type in ConventionalType::ALL {
            assert_eq!(commit_type.as_str().parse::<ConventionalType>(), Ok(commit_type));
            assert_eq!(commit_type.to_string(), commit_type.as_str());
            assert!(!commit_type.emoji().is_empty());
        }
    }

    #[test]
    fn test_emoji_table() {
        assert_eq!(ConventionalType::Feat.emoji(), "✨");
        assert_eq!(ConventionalType::Fix.emoji(), "🐛");
        assert_eq!(ConventionalType::Chore.emoji(), "🧹");
        assert_eq!(ConventionalType::Perf.emoji(), "⚡️");
    }

    #[test]
    fn test_grouped_push_and_get() {
        let mut grouped = GroupedMetadata::new();
        assert!(grouped.is_empty());

        grouped.push(CommitMetadata::new(ConventionalType::Fix, "one"));
        grouped.push(CommitMetadata::new(ConventionalType::Feat, "two"));
        grouped.push(CommitMetadata::new(ConventionalType::Fix, "three"));

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.total(), 3);
        assert_eq!(
            grouped.types(),
            vec![ConventionalType::Fix, ConventionalType::Feat]
        );
        let fixes = grouped.get(ConventionalType::Fix).unwrap();
        assert_eq!(fixes[0].description, "one");
        assert_eq!(fixes[1].description, "three");
        assert!(grouped.get(ConventionalType::Docs).is_none());
    }

    #[test]
    fn test_grouped_serializes_in_bucket_order() {
        let mut grouped = GroupedMetadata::new();
        grouped.push(CommitMetadata::new(ConventionalType::Perf, "faster"));
        grouped.push(CommitMetadata::new(ConventionalType::Build, "bundle").with_scope("web"));

        let json = serde_json::to_string(&grouped).unwrap();
        assert_eq!(
            json,
            r#"{"perf":[{"type":"perf","description":"faster"}],"build":[{"type":"build","scope":"web","description":"bundle"}]}"#
        );
    }
}
