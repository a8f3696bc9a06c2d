use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Upload a PDF and chat about it interactively.
    Chat(ChatArgs),
    /// Upload a PDF, ask questions in order, and print the transcript.
    Ask(AskArgs),
    /// Probe the backend.
    Health,
    /// Drop server-side session state.
    Purge(PurgeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// PDF to upload before the conversation starts.
    pub pdf: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// PDF to upload.
    pub pdf: PathBuf,

    /// Questions, asked one after another.
    #[arg(required = true, num_args = 1..)]
    pub questions: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PurgeArgs {
    /// Only drop this session (defaults to every session).
    #[arg(short, long)]
    pub session: Option<String>,
}
