pub use crate::changes::{ChangeRecord, ChangeStatus};
pub use crate::config::cli::Args;
pub use crate::git::{get_staged_changes, open_repository};
pub use crate::message::{normalize, CommitMessage};
pub use crate::pipeline::{run, Generation, Outcome};
pub use crate::taxonomy::CommitType;

pub mod ai;
pub mod changes;
pub mod classify;
pub mod commit;
pub mod config;
pub mod git;
pub mod logging;
pub mod message;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod taxonomy;
