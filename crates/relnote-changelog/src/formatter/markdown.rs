//! Markdown release body formatter

use tracing::{debug, instrument};

use super::NotesFormatter;
use crate::types::GroupedMetadata;

/// Separator between type blocks
const BLOCK_SEPARATOR: &str = "\n\n\n";

/// Renders one block per commit type:
///
/// ```text
/// ✨ **feat**
///
/// - add picker
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }
}

impl NotesFormatter for MarkdownFormatter {
    #[instrument(skip(self, grouped), fields(bucket_count = grouped.len()))]
    fn format(&self, grouped: &GroupedMetadata) -> String {
        let output = grouped
            .iter()
            .map(|(commit_type, items)| {
                let lines: Vec<String> = items
                    .iter()
                    .map(|metadata| format!("- {}", metadata.description))
                    .collect();
                format!(
                    "{} **{}**\n\n{}",
                    commit_type.emoji(),
                    commit_type,
                    lines.join("\n")
                )
            })
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR);

        debug!(output_len = output.len(), "release body formatted");
        output
    }
}
