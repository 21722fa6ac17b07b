//! Error types for relnote

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnoteError
pub type Result<T> = std::result::Result<T, RelnoteError>;

/// Main error type for relnote operations
#[derive(Debug, Error)]
pub enum RelnoteError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the commit range failed
    #[error(transparent)]
    RangeRead(#[from] RangeReadError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while listing the commits of a revision range
#[derive(Debug, Error)]
pub enum RangeReadError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// A revision of the range could not be resolved
    #[error("Failed to resolve revision '{revision}': {reason}")]
    UnknownRevision { revision: String, reason: String },

    /// Git2 library error
    #[error("Failed to get git log: {0}")]
    Git2(#[from] git2::Error),
}

/// Errors raised by a single build-graph dry-run query
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query tool could not be found on PATH
    #[error("Build-graph tool not found: {0}")]
    ToolNotFound(String),

    /// The query tool could not be spawned
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The query tool exited with a non-zero status
    #[error("{command} exited with status {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: i32,
        stderr: String,
    },

    /// The query output was not the expected JSON document
    #[error("Unparsable dry-run output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

impl QueryError {
    /// Whether the query tool itself is unavailable, as opposed to a single
    /// query failing
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, Self::ToolNotFound(_))
    }
}
