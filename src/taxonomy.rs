use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conventional commit types the generator is allowed to emit.
///
/// Declaration order is the order the types are listed in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    #[default]
    Feat,
    Fix,
    Chore,
    Refactor,
    Style,
    Test,
    Docs,
    Perf,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown commit type: {0}")]
pub struct UnknownCommitType(pub String);

impl CommitType {
    pub const ALL: [CommitType; 8] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Chore,
        CommitType::Refactor,
        CommitType::Style,
        CommitType::Test,
        CommitType::Docs,
        CommitType::Perf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Chore => "chore",
            CommitType::Refactor => "refactor",
            CommitType::Style => "style",
            CommitType::Test => "test",
            CommitType::Docs => "docs",
            CommitType::Perf => "perf",
        }
    }

    /// The type used whenever nothing better can be determined.
    pub fn default_type() -> Self {
        CommitType::Feat
    }

    /// Type names in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(CommitType::as_str).collect()
    }

    /// Case-insensitive exact match against the known types.
    pub fn is_valid(candidate: &str) -> bool {
        candidate.parse::<CommitType>().is_ok()
    }
}

impl FromStr for CommitType {
    type Err = UnknownCommitType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCommitType(s.to_string()))
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
