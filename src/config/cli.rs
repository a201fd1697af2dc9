use std::path::PathBuf;

use clap::Parser;

/// Generate a conventional commit message for staged changes using a local Ollama model
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the git repository
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Ollama model to generate the message with (defaults to llama2:7b-chat)
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the Ollama server (defaults to http://localhost:11434)
    #[arg(long, env = "OLLAMA_HOST")]
    pub endpoint: Option<String>,

    /// Seconds to wait for the model before using a fallback message
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Characters of diff sent to the model per file
    #[arg(long)]
    pub max_diff_chars: Option<usize>,

    /// Commit the staged changes with the generated message
    #[arg(long)]
    pub commit: bool,

    /// Never write a commit, even when --commit or the config asks for one
    #[arg(long)]
    pub dry_run: bool,

    /// Skip pre-commit and commit-msg hooks when committing
    #[arg(long)]
    pub no_verify: bool,

    /// Only output the generated commit message, without formatting
    #[arg(short, long)]
    pub message_only: bool,

    /// Print the prompt sent to the model
    #[arg(long)]
    pub show_prompt: bool,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Create a new configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Configuration file to create with --init-config, or to load instead of the discovered ones
    #[arg(long)]
    pub config_path: Option<String>,
}

impl Args {
    pub fn new_from(args: impl Iterator<Item = String>) -> Self {
        Self::parse_from(args)
    }
}
