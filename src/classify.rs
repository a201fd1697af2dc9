//! Keyword rules that infer a commit type from the staged changes.
//!
//! Used when the model's own type cannot be trusted. Rules are checked in
//! order and the first one with a matching keyword wins, so a change that
//! mentions both a bug and the README is a `fix`.

use tracing::debug;

use crate::changes::{self, ChangeRecord};
use crate::taxonomy::CommitType;

const RULES: &[(CommitType, &[&str])] = &[
    (CommitType::Test, &["test", "/tests/", "spec.", ".test."]),
    (CommitType::Fix, &["fix", "bug", "issue", "error", "crash"]),
    (
        CommitType::Refactor,
        &["refactor", "restructure", "cleanup", "clean up"],
    ),
    (CommitType::Style, &["style", "format", "lint", "prettier"]),
    (
        CommitType::Perf,
        &["perf", "performance", "optimize", "speed up"],
    ),
    (
        CommitType::Docs,
        &["docs", "documentation", "readme", "comment"],
    ),
    (CommitType::Chore, &["chore", "build", "ci", "config"]),
];

/// Pick the best matching commit type for a set of changes.
pub fn classify(changes: &[ChangeRecord]) -> CommitType {
    classify_text(&changes::render(changes))
}

/// Pick the best matching commit type for free text.
pub fn classify_text(text: &str) -> CommitType {
    let corpus = text.to_lowercase();

    for (commit_type, keywords) in RULES {
        if let Some(keyword) = keywords.iter().find(|k| corpus.contains(*k)) {
            debug!(%commit_type, keyword, "heuristic rule matched");
            return *commit_type;
        }
    }

    CommitType::default_type()
}
