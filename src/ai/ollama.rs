use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{check_status, request_error};
use super::{InferenceClient, InferenceError};

/// Upper bound for any single HTTP exchange with the Ollama server.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: &str, model: &str) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error(e, CLIENT_TIMEOUT))?;
        let response = check_status(response).await?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Malformed(e.to_string()))?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn probe(&self) -> Result<(), InferenceError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| request_error(e, CLIENT_TIMEOUT))?;
        check_status(response).await?;
        debug!(endpoint = %self.endpoint, "ollama is reachable");
        Ok(())
    }

    async fn generate(&self, prompt: &str, deadline: Duration) -> Result<String, InferenceError> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting completion");
        tokio::time::timeout(deadline, self.request_completion(prompt))
            .await
            .map_err(|_| InferenceError::Timeout(deadline))?
    }
}
