//! Commit range reader trait

use relnote_core::error::RangeReadError;

use crate::types::CommitRecord;

/// Lists the commits between two revisions.
///
/// Implementations return commits reachable from `to` but not from `from`,
/// newest first. Any failure of the underlying tool is a `RangeReadError`.
pub trait RangeReader {
    /// List the commits of `from..to`
    fn list(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>, RangeReadError>;
}
