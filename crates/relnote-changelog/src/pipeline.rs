//! Release notes pipeline
//!
//! Range reader → relevance filter → parser → grouping → rendering.

use chrono::{DateTime, Utc};
use relnote_core::error::Result;
use relnote_git::RangeReader;
use relnote_graph::BuildGraphQuery;
use tracing::{debug, info, instrument};

use crate::formatter::{MarkdownFormatter, NotesFormatter};
use crate::group::group;
use crate::parser::{CommitParser, ConventionalParser};
use crate::relevance::RelevanceFilter;
use crate::title::release_title;
use crate::types::{CommitMetadata, ReleaseNotes};

/// Inputs of one pipeline run
#[derive(Debug, Clone)]
pub struct NotesRequest {
    /// Oldest revision, excluded from the range
    pub from: String,
    /// Newest revision, included in the range
    pub to: String,
    /// Workspace the notes are for
    pub workspace: String,
    /// Release title prefix
    pub prefix: String,
    /// Time stamped into the title
    pub timestamp: DateTime<Utc>,
}

impl NotesRequest {
    /// Create a request stamped with the current time
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        workspace: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            workspace: workspace.into(),
            prefix: prefix.into(),
            timestamp: Utc::now(),
        }
    }

    /// Set the title timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Builds release notes for one workspace from a commit range
pub struct NotesPipeline<'a> {
    reader: &'a dyn RangeReader,
    query: &'a dyn BuildGraphQuery,
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn NotesFormatter>,
}

impl<'a> NotesPipeline<'a> {
    /// Create a pipeline with the conventional parser and markdown formatter
    pub fn new(reader: &'a dyn RangeReader, query: &'a dyn BuildGraphQuery) -> Self {
        Self {
            reader,
            query,
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(MarkdownFormatter::new()),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: NotesFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Run the pipeline.
    ///
    /// Failing to read the range aborts the run; everything after that is
    /// best-effort per commit.
    #[instrument(skip(self, request), fields(workspace = %request.workspace, from = %request.from, to = %request.to))]
    pub fn run(&self, request: &NotesRequest) -> Result<ReleaseNotes> {
        let title = release_title(&request.prefix, &request.timestamp);

        let commits = self.reader.list(&request.from, &request.to)?;
        info!(count = commits.len(), "commits in range");
        for commit in &commits {
            debug!(id = %commit.id, message = %commit.message, "commit in range");
        }

        let relevant = RelevanceFilter::new(self.query)
            .with_parser(self.parser.as_ref())
            .filter(&commits, &request.workspace);
        info!(count = relevant.len(), "relevant commits");
        for commit in &relevant {
            debug!(id = %commit.id, message = %commit.message, "relevant commit");
        }

        let metadata: Vec<CommitMetadata> = relevant
            .iter()
            .filter_map(|commit| self.parser.parse(&commit.message))
            .collect();
        let grouped = group(metadata);
        if let Ok(json) = serde_json::to_string_pretty(&grouped) {
            debug!(grouped = %json, "grouped metadata");
        }

        let body = self.formatter.format(&grouped);
        info!(title = %title, types = grouped.len(), "release notes rendered");

        Ok(ReleaseNotes {
            title,
            body,
            commits,
            relevant,
            grouped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConventionalType;
    use chrono::TimeZone;
    use relnote_core::error::{QueryError, RangeReadError, RelnoteError};
    use relnote_git::CommitRecord;
    use relnote_graph::DryRunReport;

    struct FixedRange(Vec<CommitRecord>);

    impl RangeReader for FixedRange {
        fn list(&self, _from: &str, _to: &str) -> std::result::Result<Vec<CommitRecord>, RangeReadError> {
            Ok(self.0.clone())
        }
    }

    struct FailingRange;

    impl RangeReader for FailingRange {
        fn list(&self, from: &str, _to: &str) -> std::result::Result<Vec<CommitRecord>, RangeReadError> {
            Err(RangeReadError::UnknownRevision {
                revision: from.to_string(),
                reason: "not found".to_string(),
            })
        }
    }

    /// Every commit touches `widgets`, except ids listed as failing
    struct WidgetsGraph {
        failing: Vec<&'static str>,
    }

    impl BuildGraphQuery for WidgetsGraph {
        fn dry_run(&self, filter: &str) -> std::result::Result<DryRunReport, QueryError> {
            if self.failing.iter().any(|id| filter.contains(&format!("[{}^1]", id))) {
                return Err(QueryError::ToolNotFound("pnpm".to_string()));
            }
            Ok(DryRunReport::new(true, ["widgets"]))
        }
    }

    fn request() -> NotesRequest {
        NotesRequest::new("c0", "HEAD", "widgets", "widgets")
            .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn test_feat_and_fix_end_to_end() {
        let reader = FixedRange(vec![
            CommitRecord::new("c2", "feat: add picker"),
            CommitRecord::new("c1", "fix: repair picker"),
        ]);
        let graph = WidgetsGraph { failing: vec![] };

        let notes = NotesPipeline::new(&reader, &graph).run(&request()).unwrap();

        assert_eq!(notes.title, "widgets-2024-01-02-03-04");
        assert_eq!(notes.relevant.len(), 2);
        assert_eq!(
            notes.grouped.types(),
            vec![ConventionalType::Feat, ConventionalType::Fix]
        );
        assert_eq!(
            notes.body,
            "✨ **feat**\n\n- add picker\n\n\n🐛 **fix**\n\n- repair picker"
        );
    }

    #[test]
    fn test_non_conventional_and_failed_commits_are_excluded() {
        let reader = FixedRange(vec![
            CommitRecord::new("c3", "update readme"),
            CommitRecord::new("c2", "feat: query explodes"),
            CommitRecord::new("c1", "chore: bump deps"),
        ]);
        let graph = WidgetsGraph { failing: vec!["c2"] };

        let notes = NotesPipeline::new(&reader, &graph).run(&request()).unwrap();

        assert_eq!(notes.commits.len(), 3);
        assert_eq!(notes.relevant, vec![CommitRecord::new("c1", "chore: bump deps")]);
        assert_eq!(notes.body, "🧹 **chore**\n\n- bump deps");
    }

    #[test]
    fn test_no_relevant_commits_gives_empty_body() {
        let reader = FixedRange(vec![]);
        let graph = WidgetsGraph { failing: vec![] };

        let notes = NotesPipeline::new(&reader, &graph).run(&request()).unwrap();

        assert!(notes.is_empty());
        assert_eq!(notes.body, "");
        assert_eq!(notes.title, "widgets-2024-01-02-03-04");
    }

    #[test]
    fn test_range_read_error_is_fatal() {
        let graph = WidgetsGraph { failing: vec![] };

        let err = NotesPipeline::new(&FailingRange, &graph)
            .run(&request())
            .unwrap_err();

        assert!(matches!(err, RelnoteError::RangeRead(_)));
        assert_eq!(err.to_string(), "Failed to resolve revision 'c0': not found");
    }

    #[test]
    fn test_run_is_deterministic() {
        let reader = FixedRange(vec![
            CommitRecord::new("c3", "docs(readme): explain filters"),
            CommitRecord::new("c2", "feat: add picker"),
            CommitRecord::new("c1", "docs: fix typo"),
        ]);
        let graph = WidgetsGraph { failing: vec![] };
        let pipeline = NotesPipeline::new(&reader, &graph);

        let first = pipeline.run(&request()).unwrap();
        let second = pipeline.run(&request()).unwrap();

        assert_eq!(first.body, second.body);
        assert_eq!(
            first.body,
            "📝 **docs**\n\n- explain filters\n- fix typo\n\n\n✨ **feat**\n\n- add picker"
        );
    }

    /// Reads any `word: text` subject as a chore
    struct LenientParser;

    impl CommitParser for LenientParser {
        fn parse(&self, message: &str) -> Option<CommitMetadata> {
            let (_, description) = message.split_once(": ")?;
            Some(CommitMetadata::new(ConventionalType::Chore, description))
        }
    }

    #[test]
    fn test_custom_parser() {
        let reader = FixedRange(vec![
            CommitRecord::new("c2", "wip: add picker"),
            CommitRecord::new("c1", "update readme"),
        ]);
        let graph = WidgetsGraph { failing: vec![] };

        let notes = NotesPipeline::new(&reader, &graph)
            .with_parser(LenientParser)
            .run(&request())
            .unwrap();

        assert_eq!(notes.relevant, vec![CommitRecord::new("c2", "wip: add picker")]);
        assert_eq!(notes.body, "🧹 **chore**\n\n- add picker");
    }

    struct PlainFormatter;

    impl NotesFormatter for PlainFormatter {
        fn format(&self, grouped: &crate::types::GroupedMetadata) -> String {
            format!("{} changes", grouped.total())
        }
    }

    #[test]
    fn test_custom_formatter() {
        let reader = FixedRange(vec![CommitRecord::new("c1", "fix: repair picker")]);
        let graph = WidgetsGraph { failing: vec![] };

        let notes = NotesPipeline::new(&reader, &graph)
            .with_formatter(PlainFormatter)
            .run(&request())
            .unwrap();

        assert_eq!(notes.body, "1 changes");
    }
}
