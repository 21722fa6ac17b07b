//! Relnote Publish - Hosted release publishing
//!
//! Creates releases on the hosting platform and looks up the revision last
//! deployed to an environment.

pub mod error;
pub mod github;
pub mod traits;
pub mod types;

pub use error::{PublishError, Result};
pub use github::{GitHubClient, GitHubConfig};
pub use traits::{DeploymentSource, ReleasePublisher};
pub use types::{PublishedRelease, ReleaseRequest, RepositorySlug};
