//! Turborepo dry-run adapter

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use relnote_core::config::GraphConfig;
use relnote_core::error::QueryError;
use tracing::{debug, instrument};

use crate::query::BuildGraphQuery;
use crate::types::DryRunReport;

/// Runs `<runner> run <task> --filter=<expr> --dry=json` in the repository
pub struct TurboQuery {
    runner: Vec<String>,
    task: String,
    root: PathBuf,
}

impl TurboQuery {
    /// Create a query from graph configuration, executed in `root`
    pub fn new(config: &GraphConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            runner: config.runner.clone(),
            task: config.task.clone(),
            root: root.into(),
        }
    }

    /// Program that is invoked (first runner element)
    pub fn program(&self) -> &str {
        self.runner.first().map(String::as_str).unwrap_or("turbo")
    }

    /// Check whether the runner program can be found on PATH
    pub fn is_available(&self) -> bool {
        which::which(self.program()).is_ok()
    }

    /// Human-readable command line, used in errors and logs
    pub fn command_line(&self, filter: &str) -> String {
        let mut parts: Vec<String> = self.runner.clone();
        parts.extend(self.args(filter));
        parts.join(" ")
    }

    fn args(&self, filter: &str) -> Vec<String> {
        vec![
            "run".to_string(),
            self.task.clone(),
            format!("--filter={}", filter),
            "--dry=json".to_string(),
        ]
    }
}

impl BuildGraphQuery for TurboQuery {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn dry_run(&self, filter: &str) -> Result<DryRunReport, QueryError> {
        let program = self.program().to_string();
        let command = self.command_line(filter);

        let mut cmd = Command::new(&program);
        cmd.args(self.runner.iter().skip(1));
        cmd.args(self.args(filter));
        cmd.current_dir(&self.root);

        debug!(command = %command, "running build-graph dry run");
        let output = cmd.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                QueryError::ToolNotFound(program.clone())
            } else {
                QueryError::Spawn {
                    command: command.clone(),
                    source: e,
                }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(QueryError::NonZeroExit {
                command,
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = DryRunReport::from_output(&stdout)?;
        debug!(
            monorepo = report.monorepo,
            packages = report.packages.len(),
            "build-graph dry run parsed"
        );
        Ok(report)
    }
}
