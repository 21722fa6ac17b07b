//! Git repository operations

use std::path::{Path, PathBuf};

use git2::{Oid, Repository};
use tracing::{debug, info, instrument};

use relnote_core::error::RangeReadError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, RangeReadError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                RangeReadError::RepositoryNotFound(path.to_path_buf())
            } else {
                RangeReadError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                RangeReadError::NotARepository(start_path.to_path_buf())
            } else {
                RangeReadError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path (the working tree root for non-bare repos)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a revision expression (`HEAD`, a tag, a sha) to a commit id
    pub fn resolve(&self, revision: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(revision)
            .map_err(|e| RangeReadError::UnknownRevision {
                revision: revision.to_string(),
                reason: e.message().to_string(),
            })?;

        let commit = object
            .peel_to_commit()
            .map_err(|e| RangeReadError::UnknownRevision {
                revision: revision.to_string(),
                reason: e.message().to_string(),
            })?;

        debug!(revision, oid = %commit.id(), "resolved revision");
        Ok(commit.id())
    }
}
