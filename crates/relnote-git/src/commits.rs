//! Commit history operations

use git2::Sort;
use tracing::{debug, instrument};

use relnote_core::error::RangeReadError;

use crate::reader::RangeReader;
use crate::repository::{GitRepo, Result};
use crate::types::CommitRecord;

impl GitRepo {
    /// Get the commits reachable from `to` but not from `from`, newest first
    #[instrument(skip(self))]
    pub fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>> {
        let from_oid = self.resolve(from)?;
        let to_oid = self.resolve(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_record(&commit));
        }

        debug!(from, to, count = commits.len(), "read commit range");
        Ok(commits)
    }
}

impl RangeReader for GitRepo {
    fn list(&self, from: &str, to: &str) -> std::result::Result<Vec<CommitRecord>, RangeReadError> {
        self.commits_between(from, to)
    }
}

/// Convert a git2 Commit to a CommitRecord
fn commit_to_record(commit: &git2::Commit<'_>) -> CommitRecord {
    let message = commit.summary().unwrap_or_default().to_string();
    CommitRecord::new(commit.id().to_string(), message)
}
