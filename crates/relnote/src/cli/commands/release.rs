//! Release command

use std::io::Write;
use std::path::Path;

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::{info, instrument};

use relnote_core::Config;
use relnote_publish::{GitHubClient, PublishedRelease, ReleasePublisher};

use super::pipeline::{load_config, GeneratedNotes, PipelineArgs};
use crate::cli::{output, Cli, OutputFormat};

/// Generate release notes and publish them as a release
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Generate and show the notes without publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            workspace = ?self.pipeline.workspace,
            from = ?self.pipeline.from,
            environment = ?self.pipeline.environment,
            dry_run = self.dry_run,
            "executing release command"
        );
        let config = load_config(cli)?;
        let client = self.publisher(&config)?;
        let rt = tokio::runtime::Runtime::new()?;
        let generated = self.pipeline.generate(&config, &rt)?;

        if !cli.quiet && cli.format == OutputFormat::Text {
            self.print_preview(&generated);
        }

        let Some(client) = client else {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            }
            return Ok(());
        };

        if generated.notes.is_empty() && !cli.quiet {
            output::warning("No relevant commits; the release body will be empty.");
        }

        // Non-interactive runs (CI) publish without prompting
        if !self.yes && console::user_attended() {
            let confirmed = Confirm::new()
                .with_prompt("Publish this release?")
                .default(true)
                .interact()?;

            if !confirmed {
                output::warning("Aborted.");
                return Ok(());
            }
        }

        let notes = &generated.notes;
        let release = rt.block_on(client.publish(&notes.title, &notes.title, &notes.body))?;

        if let Some(path) = std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
            write_github_outputs(Path::new(&path), &release)?;
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&release)?),
            OutputFormat::Text if !cli.quiet => {
                output::success(&format!("Published {}", style(&release.title).green().bold()));
                println!("{}", output::key_value("Repository", &client.repository().to_string()));
                println!("{}", output::key_value("URL", &release.url));
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }

    /// GitHub client for a real run, `None` on a dry run
    fn publisher(&self, config: &Config) -> relnote_publish::Result<Option<GitHubClient>> {
        if self.dry_run {
            return Ok(None);
        }
        self.pipeline.github.client(config).map(Some)
    }

    fn print_preview(&self, generated: &GeneratedNotes) {
        let notes = &generated.notes;

        println!("{}", output::header("Release Preview"));
        println!();
        println!("{}", output::key_value("Workspace", &generated.workspace));
        println!(
            "{}",
            output::key_value("Range", &format!("{}..{}", generated.from, generated.to))
        );
        println!("{}", output::key_value("Title", &style(&notes.title).yellow().to_string()));
        println!(
            "{}",
            output::key_value(
                "Commits",
                &format!("{} relevant of {}", notes.relevant.len(), notes.commits.len())
            )
        );
        println!();
        println!("---");
        println!("{}", notes.body);
        println!("---");
        println!();

        if self.dry_run {
            println!("  {}", style("[DRY RUN - nothing will be published]").yellow().bold());
            println!();
        }
    }
}

/// Append the release as step outputs (`release-url`, `release-title`,
/// `release-body`) to a GitHub Actions output file
#[instrument(skip(release), fields(path = %path.display()))]
fn write_github_outputs(path: &Path, release: &PublishedRelease) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    for (name, value) in [
        ("release-url", &release.url),
        ("release-title", &release.title),
        ("release-body", &release.body),
    ] {
        file.write_all(output_entry(name, value).as_bytes())?;
    }

    info!("step outputs written");
    Ok(())
}

/// `name<<DELIM\nvalue\nDELIM\n`, with a delimiter that does not occur in `value`
fn output_entry(name: &str, value: &str) -> String {
    let mut delimiter = String::from("RELNOTE_EOF");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::pipeline::GitHubArgs;
    use relnote_publish::PublishError;
    use tempfile::TempDir;

    fn command(dry_run: bool, token: &str, repository: &str) -> ReleaseCommand {
        ReleaseCommand {
            pipeline: PipelineArgs {
                workspace: Some("widgets".to_string()),
                prefix: None,
                from: Some("v1".to_string()),
                environment: None,
                to: None,
                runner: None,
                task: None,
                github: GitHubArgs {
                    token: Some(token.to_string()),
                    repository: Some(repository.to_string()),
                },
            },
            dry_run,
            yes: false,
        }
    }

    #[test]
    fn test_publisher_rejects_bad_repository_up_front() {
        let err = command(false, "t0ken", "widgets")
            .publisher(&Config::default())
            .err()
            .unwrap();
        assert!(matches!(err, PublishError::InvalidRepository(_)));
    }

    #[test]
    fn test_publisher_is_built_for_real_runs() {
        let client = command(false, "t0ken", "octo/widgets")
            .publisher(&Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(client.repository().to_string(), "octo/widgets");
    }

    #[test]
    fn test_dry_run_needs_no_publisher() {
        let publisher = command(true, "", "widgets")
            .publisher(&Config::default())
            .unwrap();
        assert!(publisher.is_none());
    }

    #[test]
    fn test_output_entry_single_line() {
        assert_eq!(
            output_entry("release-title", "web-2024-01-02-03-04"),
            "release-title<<RELNOTE_EOF\nweb-2024-01-02-03-04\nRELNOTE_EOF\n"
        );
    }

    #[test]
    fn test_output_entry_multi_line() {
        let body = "✨ **feat**\n\n- add picker";
        assert_eq!(
            output_entry("release-body", body),
            "release-body<<RELNOTE_EOF\n✨ **feat**\n\n- add picker\nRELNOTE_EOF\n"
        );
    }

    #[test]
    fn test_output_entry_avoids_delimiter_in_value() {
        let entry = output_entry("release-body", "RELNOTE_EOF");
        assert_eq!(entry, "release-body<<RELNOTE_EOF_\nRELNOTE_EOF\nRELNOTE_EOF_\n");
    }

    #[test]
    fn test_write_github_outputs_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let release = PublishedRelease {
            url: "https://github.com/octo/widgets/releases/tag/w-1".to_string(),
            title: "w-1".to_string(),
            body: "🐛 **fix**\n\n- repair picker".to_string(),
        };
        write_github_outputs(&path, &release).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing=1\n"));
        assert!(content.contains(
            "release-url<<RELNOTE_EOF\nhttps://github.com/octo/widgets/releases/tag/w-1\nRELNOTE_EOF\n"
        ));
        assert!(content.contains("release-title<<RELNOTE_EOF\nw-1\nRELNOTE_EOF\n"));
        assert!(content.ends_with("release-body<<RELNOTE_EOF\n🐛 **fix**\n\n- repair picker\nRELNOTE_EOF\n"));
    }
}
