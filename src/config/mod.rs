pub mod cli;
pub mod defaults;
pub mod file;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ai::ollama::CLIENT_TIMEOUT;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Settings read from a configuration file; unset keys leave lower layers alone.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_diff_chars: Option<usize>,
    pub commit: Option<bool>,
    pub message_only: Option<bool>,
}

impl ConfigFile {
    /// Load a configuration file, choosing the format from its extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            Some(ext) => Err(parse_error(format!("Unsupported file format: {}", ext))),
            None => Err(parse_error("Unknown file format".to_string())),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_diff_chars: usize,
    pub commit: bool,
    pub message_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_ENDPOINT.to_string(),
            model: defaults::DEFAULT_MODEL.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
            max_diff_chars: defaults::MAX_DIFF_CHARS,
            commit: defaults::COMMIT,
            message_only: defaults::MESSAGE_ONLY,
        }
    }
}

impl Config {
    /// Load configuration from all sources: defaults, the global file, the
    /// project file found above `workdir` (or `--config-path`), then CLI args.
    pub fn load(args: &cli::Args, workdir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();

        if let Some(global) = file::global_config_file().filter(|p| p.is_file()) {
            layers.push(global);
        }

        match &args.config_path {
            Some(explicit) => layers.push(PathBuf::from(explicit)),
            None => layers.extend(workdir.and_then(file::find_project_config)),
        }

        Self::load_layers(&layers, args)
    }

    /// Apply each file in order, then the CLI arguments.
    pub fn load_layers(files: &[PathBuf], args: &cli::Args) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for path in files {
            debug!(path = %path.display(), "loading config file");
            config.merge(&ConfigFile::from_file(path)?);
        }

        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Merge a file layer (its set values take precedence)
    pub fn merge(&mut self, other: &ConfigFile) {
        if let Some(endpoint) = &other.endpoint {
            self.endpoint = normalize_endpoint(endpoint);
        }
        if let Some(model) = &other.model {
            self.model = model.clone();
        }
        if let Some(timeout_secs) = other.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(max_diff_chars) = other.max_diff_chars {
            self.max_diff_chars = max_diff_chars;
        }
        if let Some(commit) = other.commit {
            self.commit = commit;
        }
        if let Some(message_only) = other.message_only {
            self.message_only = message_only;
        }
    }

    /// Apply CLI args on top of everything else
    pub fn apply_args(&mut self, args: &cli::Args) {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = normalize_endpoint(endpoint);
        }
        if let Some(model) = &args.model {
            self.model = model.clone();
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(max_diff_chars) = args.max_diff_chars {
            self.max_diff_chars = max_diff_chars;
        }
        if args.commit {
            self.commit = true;
        }
        if args.message_only {
            self.message_only = true;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be at least one second".to_string(),
            ));
        }
        if self.timeout_secs > CLIENT_TIMEOUT.as_secs() {
            return Err(ConfigError::Validation(format!(
                "timeout must not exceed {} seconds",
                CLIENT_TIMEOUT.as_secs()
            )));
        }
        if self.max_diff_chars == 0 {
            return Err(ConfigError::Validation(
                "max_diff_chars must be greater than zero".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".to_string()));
        }
        Ok(())
    }

    /// Deadline for a single generate call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Accept `host:port` style values (as `OLLAMA_HOST` often holds) as well as full URLs.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}
