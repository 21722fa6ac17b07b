//! Notes command

use clap::Args;
use tracing::info;

use super::pipeline::{load_config, GeneratedNotes, PipelineArgs};
use crate::cli::{output, Cli, OutputFormat};

/// Generate release notes without publishing them
#[derive(Debug, Args)]
pub struct NotesCommand {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl NotesCommand {
    /// Execute the notes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            workspace = ?self.pipeline.workspace,
            from = ?self.pipeline.from,
            environment = ?self.pipeline.environment,
            "executing notes command"
        );
        let config = load_config(cli)?;
        let rt = tokio::runtime::Runtime::new()?;
        let generated = self.pipeline.generate(&config, &rt)?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&generated)?),
            OutputFormat::Text => print_text(&generated, cli.quiet),
        }

        Ok(())
    }
}

fn print_text(generated: &GeneratedNotes, quiet: bool) {
    let notes = &generated.notes;

    if !quiet {
        println!("{}", output::header(&notes.title));
        println!(
            "{}",
            output::key_value("Range", &format!("{}..{}", generated.from, generated.to))
        );
        println!(
            "{}",
            output::key_value(
                "Commits",
                &format!("{} relevant of {}", notes.relevant.len(), notes.commits.len())
            )
        );
        println!();
    }

    if notes.is_empty() {
        if !quiet {
            output::info(&format!("No relevant commits for {}", generated.workspace));
        }
        return;
    }

    println!("{}", notes.body);
}
