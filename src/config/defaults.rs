//! Default values for configuration

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2:7b-chat";

/// Seconds allowed for a single generate call.
pub const TIMEOUT_SECS: u64 = 300;
pub const MAX_DIFF_CHARS: usize = crate::changes::MAX_DIFF_CHARS;

pub const COMMIT: bool = false;
pub const MESSAGE_ONLY: bool = false;

// File paths
pub const DEFAULT_CONFIG_FILENAME: &str = ".ai-commit.toml";
pub const GLOBAL_CONFIG_DIRNAME: &str = "ai-commit";
pub const GLOBAL_CONFIG_FILENAME: &str = "config.toml";

/// Example configuration for initialization
pub fn example_config() -> String {
    format!(
        r#"# ai-commit configuration file

# Ollama server and model
endpoint = "{}"
model = "{}"

# Seconds to wait for the model before falling back to a generic message
timeout_secs = {}

# Characters of diff sent per file
max_diff_chars = {}

# Write the commit after generating the message (--dry-run always skips it)
commit = {}

# Print only the message
message_only = {}
"#,
        DEFAULT_ENDPOINT, DEFAULT_MODEL, TIMEOUT_SECS, MAX_DIFF_CHARS, COMMIT, MESSAGE_ONLY,
    )
}
