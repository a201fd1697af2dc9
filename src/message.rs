//! Turning free-form model output into a well-formed commit message.

use std::fmt;

use tracing::debug;

use crate::changes::ChangeRecord;
use crate::classify;
use crate::taxonomy::CommitType;

/// Description used when nothing usable came back from the model.
pub const FALLBACK_DESCRIPTION: &str = "update files";

/// A `<type>: <description>` commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub r#type: CommitType,
    pub description: String,
}

impl CommitMessage {
    pub fn new(r#type: CommitType, description: impl Into<String>) -> Self {
        Self {
            r#type,
            description: description.into(),
        }
    }

    /// The message used when generation fails or produces nothing.
    pub fn fallback() -> Self {
        Self::new(CommitType::default_type(), FALLBACK_DESCRIPTION)
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.r#type, self.description)
    }
}

/// Parse raw model output into a commit message. Never fails.
///
/// The model's type is kept only if it names a known commit type; anything
/// else is replaced by [`classify::classify`] over `changes`. A missing
/// separator makes the whole text the description, and an empty description
/// falls back to the whole text.
pub fn normalize(raw: &str, changes: &[ChangeRecord]) -> CommitMessage {
    let message = raw.trim();
    if message.is_empty() {
        return CommitMessage::fallback();
    }

    let Some((head, tail)) = message.split_once(':') else {
        return CommitMessage::new(CommitType::default_type(), message);
    };

    let candidate = head.trim().to_lowercase();
    let r#type = match candidate.parse::<CommitType>() {
        Ok(t) => t,
        Err(_) => {
            let inferred = classify::classify(changes);
            debug!(
                candidate = %candidate,
                %inferred,
                "model type rejected, using heuristic type"
            );
            inferred
        }
    };

    let description = match tail.trim() {
        "" => message,
        d => d,
    };

    CommitMessage::new(r#type, description)
}
