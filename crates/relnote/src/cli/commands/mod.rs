//! CLI commands

mod completions;
mod init;
mod notes;
mod pipeline;
mod release;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use notes::NotesCommand;
pub use release::ReleaseCommand;
