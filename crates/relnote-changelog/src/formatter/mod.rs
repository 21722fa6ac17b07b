//! Release body formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::GroupedMetadata;

/// Trait for release body formatters
pub trait NotesFormatter: Send + Sync {
    /// Render grouped metadata. Must be deterministic.
    fn format(&self, grouped: &GroupedMetadata) -> String;
}
