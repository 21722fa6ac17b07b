//! Publisher traits

use crate::error::Result;
use crate::types::PublishedRelease;

/// Creates a hosted release from rendered notes
#[async_trait::async_trait]
pub trait ReleasePublisher: Send + Sync {
    /// Publish a release tagged `tag` with the given title and body
    async fn publish(&self, tag: &str, title: &str, body: &str) -> Result<PublishedRelease>;
}

/// Looks up what is currently deployed to an environment
#[async_trait::async_trait]
pub trait DeploymentSource: Send + Sync {
    /// Revision of the most recent deployment to `environment`, if any
    async fn latest_deployment_sha(&self, environment: &str) -> Result<Option<String>>;
}
