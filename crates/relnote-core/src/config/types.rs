//! Configuration types

use serde::{Deserialize, Serialize};

use super::defaults::{default_graph_runner, DEFAULT_API_URL, DEFAULT_GRAPH_TASK};

/// Main configuration for relnote
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release naming and target workspace
    pub release: ReleaseConfig,

    /// Build-graph query configuration
    pub graph: GraphConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Publishing configuration
    pub publish: PublishConfig,
}

/// Release configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Prefix of the release title and tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Workspace whose build graph decides relevance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

/// Build-graph query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Program and leading arguments used to invoke the tool
    pub runner: Vec<String>,

    /// Task whose dry run is inspected
    pub task: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            runner: default_graph_runner(),
            task: DEFAULT_GRAPH_TASK.to_string(),
        }
    }
}

impl GraphConfig {
    /// Program name of the runner, if configured
    pub fn program(&self) -> Option<&str> {
        self.runner.first().map(String::as_str)
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Newest revision of the range when none is given
    pub to: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            to: "HEAD".to_string(),
        }
    }
}

/// Publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// REST API root of the hosting platform
    pub api_url: String,

    /// Repository slug (`owner/name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Create releases as drafts
    pub draft: bool,

    /// Mark releases as prereleases
    pub prerelease: bool,

    /// Commitish the release tag is created from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            repository: None,
            draft: false,
            prerelease: false,
            target_commitish: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.release.prefix.is_none());
        assert_eq!(config.graph.program(), Some("pnpm"));
        assert_eq!(config.git.to, "HEAD");
        assert!(!config.publish.draft);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[release]\nworkspace = \"widgets\"\n").unwrap();
        assert_eq!(config.release.workspace.as_deref(), Some("widgets"));
        assert_eq!(config.graph.task, "build");
        assert_eq!(config.publish.api_url, "https://api.github.com");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = "graph:\n  runner: [npx, turbo]\n  task: deploy\npublish:\n  draft: true\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.graph.runner, vec!["npx", "turbo"]);
        assert_eq!(config.graph.task, "deploy");
        assert!(config.publish.draft);
    }
}
