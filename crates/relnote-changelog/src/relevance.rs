//! Per-commit relevance filtering against a workspace's build graph
//!
//! Each commit is checked on its own, against the state of its first parent,
//! so that a commit introducing a workspace is judged relative to what
//! existed before it. Queries run one at a time: the build tool reads
//! repository state and concurrent runs against one checkout can race.

use relnote_core::error::QueryError;
use relnote_git::CommitRecord;
use relnote_graph::{filter_expression, BuildGraphQuery};
use tracing::{debug, info, instrument, warn};

use crate::parser::{CommitParser, ConventionalParser};

static CONVENTIONAL: ConventionalParser = ConventionalParser;

/// Outcome of checking one commit
#[derive(Debug)]
pub enum Relevance {
    /// Affects the workspace and follows the commit grammar
    Relevant,
    /// The build graph says the workspace is unaffected
    NotAffected,
    /// Affects the workspace but the subject is not a conventional commit
    NotConventional,
    /// The build-graph query failed; the commit is excluded
    QueryFailed(QueryError),
}

impl Relevance {
    /// Whether the commit belongs in the release notes
    pub fn is_relevant(&self) -> bool {
        matches!(self, Self::Relevant)
    }
}

/// Keeps the commits of a range that matter to one workspace
pub struct RelevanceFilter<'a> {
    query: &'a dyn BuildGraphQuery,
    parser: &'a dyn CommitParser,
}

impl<'a> RelevanceFilter<'a> {
    /// Create a filter backed by a build-graph query, gating subjects with
    /// the conventional commit grammar
    pub fn new(query: &'a dyn BuildGraphQuery) -> Self {
        Self {
            query,
            parser: &CONVENTIONAL,
        }
    }

    /// Gate subjects with a custom parser
    pub fn with_parser(mut self, parser: &'a dyn CommitParser) -> Self {
        self.parser = parser;
        self
    }

    /// Decide whether a single commit is relevant to `workspace`
    pub fn classify(&self, commit: &CommitRecord, workspace: &str) -> Relevance {
        let filter = filter_expression(workspace, &commit.id);

        let report = match self.query.dry_run(&filter) {
            Ok(report) => report,
            Err(err) => return Relevance::QueryFailed(err),
        };

        if !report.affects(workspace) {
            Relevance::NotAffected
        } else if !self.parser.is_conventional(&commit.message) {
            Relevance::NotConventional
        } else {
            Relevance::Relevant
        }
    }

    /// Keep the relevant commits, in their original order.
    ///
    /// Query failures exclude only the commit they happened on.
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn filter(&self, commits: &[CommitRecord], workspace: &str) -> Vec<CommitRecord> {
        let mut relevant = Vec::new();

        for commit in commits {
            match self.classify(commit, workspace) {
                Relevance::Relevant => {
                    debug!(commit = commit.short_id(), "commit is relevant");
                    relevant.push(commit.clone());
                }
                Relevance::NotAffected => {
                    debug!(commit = commit.short_id(), "workspace not affected");
                }
                Relevance::NotConventional => {
                    debug!(
                        commit = commit.short_id(),
                        message = %commit.message,
                        "skipping non-conventional commit"
                    );
                }
                Relevance::QueryFailed(err) if err.is_tool_missing() => {
                    warn!(commit = commit.short_id(), error = %err, "build-graph tool unavailable");
                }
                Relevance::QueryFailed(err) => {
                    debug!(commit = commit.short_id(), error = %err, "build-graph query failed");
                }
            }
        }

        info!(
            workspace,
            total = commits.len(),
            relevant = relevant.len(),
            "relevance filter complete"
        );
        relevant
    }
}
