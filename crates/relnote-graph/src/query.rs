//! Build-graph query trait

use relnote_core::error::QueryError;

use crate::types::DryRunReport;

/// A read-only dry-run query against the repository's build graph
pub trait BuildGraphQuery {
    /// Report which packages a filter expression selects
    fn dry_run(&self, filter: &str) -> Result<DryRunReport, QueryError>;
}

/// Filter selecting `workspace` and its dependencies, restricted to what
/// changed since the first parent of `revision`
pub fn filter_expression(workspace: &str, revision: &str) -> String {
    format!("{}...[{}^1]", workspace, revision)
}
