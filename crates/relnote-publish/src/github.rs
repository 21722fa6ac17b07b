//! GitHub releases and deployments
//!
//! ## Authentication
//!
//! Uses the configured token, falling back to the `GITHUB_TOKEN`
//! environment variable. The repository falls back to `GITHUB_REPOSITORY`.

use relnote_core::config::PublishConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::{PublishError, Result};
use crate::traits::{DeploymentSource, ReleasePublisher};
use crate::types::{PublishedRelease, ReleaseRequest, RepositorySlug};

const USER_AGENT: &str = concat!("relnote/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST API root (default: "https://api.github.com")
    pub api_url: String,
    /// Access token
    pub token: Option<String>,
    /// Repository slug (`owner/name`)
    pub repository: Option<String>,
    /// Create releases as drafts
    pub draft: bool,
    /// Mark releases as prereleases
    pub prerelease: bool,
    /// Commitish new tags point at
    pub target_commitish: Option<String>,
}

impl GitHubConfig {
    /// Build from the publish section of the configuration
    pub fn from_config(config: &PublishConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            token: None,
            repository: config.repository.clone(),
            draft: config.draft,
            prerelease: config.prerelease,
            target_commitish: config.target_commitish.clone(),
        }
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the repository slug
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self::from_config(&PublishConfig::default())
    }
}

/// GitHub REST client for releases and deployments
pub struct GitHubClient {
    api_url: String,
    token: String,
    repository: RepositorySlug,
    draft: bool,
    prerelease: bool,
    target_commitish: Option<String>,
    client: Client,
}

impl GitHubClient {
    /// Create a client, resolving token and repository from the environment
    /// when the configuration leaves them unset
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let token = first_non_empty(config.token, std::env::var("GITHUB_TOKEN").ok())
            .ok_or(PublishError::MissingToken)?;
        let repository = first_non_empty(config.repository, std::env::var("GITHUB_REPOSITORY").ok())
            .ok_or_else(|| PublishError::InvalidRepository(String::new()))?
            .parse::<RepositorySlug>()?;

        debug!(repository = %repository, api_url = %config.api_url, "github client configured");

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            repository,
            draft: config.draft,
            prerelease: config.prerelease,
            target_commitish: config.target_commitish,
            client: Client::new(),
        })
    }

    /// Repository the client talks to
    pub fn repository(&self) -> &RepositorySlug {
        &self.repository
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.repository.owner, self.repository.name, path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Create a release from a full request
    #[instrument(skip(self, request), fields(repository = %self.repository, tag = %request.tag_name))]
    pub async fn create_release(&self, request: &ReleaseRequest) -> Result<PublishedRelease> {
        info!(tag = %request.tag_name, draft = request.draft, "creating release");
        let response = self
            .authorized(self.client.post(self.repo_url("releases")))
            .json(request)
            .send()
            .await?;

        let response = check_status(response, "Failed to create release").await?;
        let created: ReleaseResponse = response.json().await?;
        info!(url = %created.html_url, "release created");

        Ok(PublishedRelease {
            url: created.html_url,
            title: created.name.unwrap_or_else(|| request.name.clone()),
            body: created.body.unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait]
impl ReleasePublisher for GitHubClient {
    async fn publish(&self, tag: &str, title: &str, body: &str) -> Result<PublishedRelease> {
        let request = ReleaseRequest {
            draft: self.draft,
            prerelease: self.prerelease,
            target_commitish: self.target_commitish.clone(),
            ..ReleaseRequest::new(tag, title, body)
        };
        self.create_release(&request).await
    }
}

#[async_trait::async_trait]
impl DeploymentSource for GitHubClient {
    #[instrument(skip(self), fields(repository = %self.repository))]
    async fn latest_deployment_sha(&self, environment: &str) -> Result<Option<String>> {
        let response = self
            .authorized(self.client.get(self.repo_url("deployments")))
            .query(&[("environment", environment), ("per_page", "1")])
            .send()
            .await?;

        let context = format!("Failed to get deployments for environment {}", environment);
        let response = check_status(response, &context).await?;
        let deployments: Vec<DeploymentResponse> = response.json().await?;

        let sha = deployments.into_iter().next().map(|d| d.sha);
        debug!(environment, sha = ?sha, "latest deployment");
        Ok(sha)
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    html_url: String,
    name: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeploymentResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Turn a non-success response into `PublishError::Api`
async fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.message)
        .unwrap_or(text);

    Err(PublishError::Api {
        context: context.to_string(),
        status: status.as_u16(),
        message,
    })
}

fn first_non_empty(explicit: Option<String>, fallback: Option<String>) -> Option<String> {
    explicit
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
}
