//! Arguments and plumbing shared by `notes` and `release`

use clap::Args;
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing::{info, instrument, warn};

use relnote_changelog::{NotesPipeline, NotesRequest, ReleaseNotes};
use relnote_core::config::{load_config_or_default, validate_prefix, Config, GraphConfig};
use relnote_core::error::ConfigError;
use relnote_git::GitRepo;
use relnote_graph::TurboQuery;
use relnote_publish::{DeploymentSource, GitHubClient, GitHubConfig};

use crate::cli::{output, Cli};

/// Range, workspace and build-graph selection
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Workspace whose build graph decides relevance
    #[arg(short, long, env = "RELNOTE_WORKSPACE")]
    pub workspace: Option<String>,

    /// Release title prefix (default: the workspace name)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Oldest revision, excluded from the range
    #[arg(long, conflicts_with = "environment")]
    pub from: Option<String>,

    /// Start from the revision last deployed to this environment
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Newest revision, included in the range
    #[arg(long)]
    pub to: Option<String>,

    /// Build-graph runner command, e.g. "npx turbo"
    #[arg(long)]
    pub runner: Option<String>,

    /// Build-graph task to dry-run
    #[arg(long)]
    pub task: Option<String>,

    #[command(flatten)]
    pub github: GitHubArgs,
}

/// GitHub access
#[derive(Debug, Args)]
pub struct GitHubArgs {
    /// Access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository as owner/name (default: publish.repository, then $GITHUB_REPOSITORY)
    #[arg(long)]
    pub repository: Option<String>,
}

impl GitHubArgs {
    /// Build a client from flags layered over the publish configuration
    pub fn client(&self, config: &Config) -> relnote_publish::Result<GitHubClient> {
        let mut github = GitHubConfig::from_config(&config.publish);
        if let Some(token) = &self.token {
            github = github.with_token(token);
        }
        if let Some(repository) = &self.repository {
            github = github.with_repository(repository);
        }
        GitHubClient::new(github)
    }
}

/// Flags merged over configuration
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub workspace: String,
    pub prefix: String,
    pub to: String,
    pub graph: GraphConfig,
}

/// Notes of one run together with the range they cover
#[derive(Debug, Serialize)]
pub struct GeneratedNotes {
    pub workspace: String,
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub notes: ReleaseNotes,
}

impl PipelineArgs {
    /// Merge flags over configuration and validate the result
    pub fn settings(&self, config: &Config) -> relnote_core::Result<RunSettings> {
        let workspace = self
            .workspace
            .clone()
            .or_else(|| config.release.workspace.clone())
            .filter(|w| !w.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("release.workspace (or --workspace)".to_string()))?;

        let prefix = self
            .prefix
            .clone()
            .or_else(|| config.release.prefix.clone())
            .unwrap_or_else(|| workspace.clone());
        validate_prefix(&prefix)?;

        let mut graph = config.graph.clone();
        if let Some(runner) = &self.runner {
            graph.runner = runner.split_whitespace().map(String::from).collect();
        }
        if let Some(task) = &self.task {
            graph.task = task.clone();
        }
        if graph.runner.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "graph.runner".to_string(),
                message: "runner command cannot be empty".to_string(),
            }
            .into());
        }

        Ok(RunSettings {
            workspace,
            prefix,
            to: self.to.clone().unwrap_or_else(|| config.git.to.clone()),
            graph,
        })
    }

    /// Resolve the exclusive start of the range
    pub fn resolve_from(&self, config: &Config, to: &str, rt: &Runtime) -> anyhow::Result<String> {
        if let Some(from) = &self.from {
            return Ok(from.clone());
        }

        let Some(environment) = &self.environment else {
            return Err(ConfigError::MissingField("--from or --environment".to_string()).into());
        };

        let client = self.github.client(config)?;
        let from = rt.block_on(previous_revision(&client, environment, &current_revision(to)))?;
        Ok(from)
    }

    /// Run the notes pipeline in the repository containing the working directory
    pub fn generate(&self, config: &Config, rt: &Runtime) -> anyhow::Result<GeneratedNotes> {
        let settings = self.settings(config)?;
        let from = self.resolve_from(config, &settings.to, rt)?;

        let cwd = std::env::current_dir()?;
        let repo = GitRepo::discover(&cwd)?;
        let query = TurboQuery::new(&settings.graph, repo.path());
        if !query.is_available() {
            warn!(
                program = query.program(),
                "build-graph tool not found on PATH; no commit will be considered relevant"
            );
        }

        let request = NotesRequest::new(&from, &settings.to, &settings.workspace, &settings.prefix);
        let notes = NotesPipeline::new(&repo, &query).run(&request)?;

        Ok(GeneratedNotes {
            workspace: settings.workspace,
            from,
            to: settings.to,
            notes,
        })
    }
}

/// Load configuration from the working directory, warning when none exists
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    let (config, path) = load_config_or_default(&cwd)?;

    match path {
        Some(path) => info!(path = %path.display(), "using configuration"),
        None if !cli.quiet => {
            output::warning("No configuration found, using defaults. Run `relnote init` to create one.")
        }
        None => {}
    }
    Ok(config)
}

/// Revision being released: `$GITHUB_SHA` inside Actions, `to` otherwise
pub fn current_revision(to: &str) -> String {
    std::env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.trim().is_empty())
        .unwrap_or_else(|| to.to_string())
}

/// Revision last deployed to `environment`.
///
/// Without any deployment the range collapses to `current`, so the release
/// has no commits.
#[instrument(skip(source))]
pub async fn previous_revision(
    source: &dyn DeploymentSource,
    environment: &str,
    current: &str,
) -> relnote_publish::Result<String> {
    match source.latest_deployment_sha(environment).await? {
        Some(sha) => {
            info!(environment, sha = %sha, "previous revision from latest deployment");
            Ok(sha)
        }
        None => {
            warn!(environment, current, "no deployment found, using the current revision");
            Ok(current.to_string())
        }
    }
}
