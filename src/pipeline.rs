//! The end-to-end flow from staged changes to a commit message.

use std::time::Duration;

use tracing::{info, warn};

use crate::ai::{InferenceClient, InferenceError};
use crate::changes::ChangeRecord;
use crate::message::{self, CommitMessage};
use crate::prompts;

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing is staged; no request was made.
    NoStagedChanges,
    /// The backend failed its liveness probe; no message was generated.
    BackendUnreachable(InferenceError),
    Generated(Generation),
}

#[derive(Debug)]
pub struct Generation {
    pub message: CommitMessage,
    /// The prompt sent to the model.
    pub prompt: String,
    /// Set when generation failed and the fallback message was substituted.
    pub generation_error: Option<InferenceError>,
}

impl Generation {
    pub fn used_fallback(&self) -> bool {
        self.generation_error.is_some()
    }
}

/// Run the pipeline over already extracted changes.
pub async fn run(
    client: &dyn InferenceClient,
    changes: &[ChangeRecord],
    deadline: Duration,
) -> Outcome {
    if changes.is_empty() {
        info!("no staged changes");
        return Outcome::NoStagedChanges;
    }

    if let Err(e) = client.probe().await {
        warn!(backend = client.name(), error = %e, "backend probe failed");
        return Outcome::BackendUnreachable(e);
    }

    let prompt = prompts::user_prompt(changes);
    info!(
        backend = client.name(),
        files = changes.len(),
        prompt_chars = prompt.len(),
        "generating commit message"
    );

    let (message, generation_error) = match client.generate(&prompt, deadline).await {
        Ok(raw) => (message::normalize(&raw, changes), None),
        Err(e) => {
            warn!(error = %e, "failed to generate commit message, using fallback");
            (CommitMessage::fallback(), Some(e))
        }
    };

    Outcome::Generated(Generation {
        message,
        prompt,
        generation_error,
    })
}
