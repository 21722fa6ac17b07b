//! Relnote Changelog - Release notes for one workspace of a monorepo
//!
//! This crate classifies a commit range against a workspace's build graph,
//! parses conventional commit subjects and renders them as a grouped
//! markdown release body.

pub mod formatter;
mod group;
pub mod parser;
pub mod pipeline;
pub mod relevance;
mod title;
pub mod types;

pub use formatter::{MarkdownFormatter, NotesFormatter};
pub use group::group;
pub use parser::{is_conventional_commit, parse_commit_message, CommitParser, ConventionalParser};
pub use pipeline::{NotesPipeline, NotesRequest};
pub use relevance::{Relevance, RelevanceFilter};
pub use title::{release_title, TITLE_TIMESTAMP_FORMAT};
pub use types::{CommitMetadata, ConventionalType, GroupedMetadata, ReleaseNotes};
