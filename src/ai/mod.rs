pub mod http;
pub mod ollama;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaClient;

/// Failures talking to a text-generation backend.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// A backend that turns a prompt into text.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    fn name(&self) -> &str;

    /// Check that the backend is reachable before doing any real work.
    async fn probe(&self) -> Result<(), InferenceError>;

    /// Generate a completion, giving up once `deadline` has elapsed.
    async fn generate(&self, prompt: &str, deadline: Duration) -> Result<String, InferenceError>;
}
