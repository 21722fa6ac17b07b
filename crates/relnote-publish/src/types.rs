//! Publishing types

use serde::{Deserialize, Serialize};

use crate::error::PublishError;

/// Repository on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySlug {
    /// Owning user or organisation
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl std::str::FromStr for RepositorySlug {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(PublishError::InvalidRepository(s.to_string())),
        }
    }
}

impl std::fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Release to create
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseRequest {
    /// Tag created for the release
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Release body (markdown)
    pub body: String,
    /// Create as a draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
    /// Commitish the tag points at when it does not exist yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
}

impl ReleaseRequest {
    /// Create a published, non-prerelease release request
    pub fn new(tag_name: impl Into<String>, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: name.into(),
            body: body.into(),
            draft: false,
            prerelease: false,
            target_commitish: None,
        }
    }
}

/// A release as reported back by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRelease {
    /// Web URL of the release
    pub url: String,
    /// Release title
    pub title: String,
    /// Release body
    pub body: String,
}
