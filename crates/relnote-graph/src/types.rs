//! Dry-run report types

use serde::{Deserialize, Serialize};

/// The subset of a `--dry=json` document needed to decide affectedness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunReport {
    /// Whether the repository has a multi-package structure
    pub monorepo: bool,
    /// Packages selected by the filter; absent for single-package repositories
    #[serde(default)]
    pub packages: Vec<String>,
    /// Version of the build tool that produced the report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbo_version: Option<String>,
    /// Tasks the dry run would execute
    #[serde(default)]
    pub tasks: Vec<TaskSummary>,
}

/// One task of a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Fully qualified task id (`package#task`)
    pub task_id: String,
    /// Package the task belongs to
    pub package: String,
    /// Package directory relative to the repository root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl DryRunReport {
    /// Create a report from its package list
    pub fn new(monorepo: bool, packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            monorepo,
            packages: packages.into_iter().map(Into::into).collect(),
            turbo_version: None,
            tasks: Vec::new(),
        }
    }

    /// Whether `workspace` is among the selected packages
    pub fn includes(&self, workspace: &str) -> bool {
        self.packages.iter().any(|p| p == workspace)
    }

    /// Whether a change described by this report affects `workspace`.
    ///
    /// Single-package repositories are always affected.
    pub fn affects(&self, workspace: &str) -> bool {
        !self.monorepo || self.includes(workspace)
    }

    /// Parse a report from tool output.
    ///
    /// Package-manager wrappers may print banner lines around the document,
    /// so when the whole output is not JSON the span from the first `{` to
    /// the last `}` is tried before giving up.
    pub fn from_output(output: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str(output) {
            Ok(report) => Ok(report),
            Err(err) => match (output.find('{'), output.rfind('}')) {
                (Some(start), Some(end)) if start < end => {
                    serde_json::from_str(&output[start..=end])
                }
                _ => Err(err),
            },
        }
    }
}
