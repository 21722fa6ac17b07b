//! Relnote Graph - Build-graph affectedness queries
//!
//! Answers "which packages would be rebuilt for this filter expression?"
//! by asking the monorepo build tool for a dry run.

mod query;
mod turbo;
pub mod types;

pub use query::{filter_expression, BuildGraphQuery};
pub use turbo::TurboQuery;
pub use types::{DryRunReport, TaskSummary};
