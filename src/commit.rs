//! Git commit creation that respects hooks.
//!
//! Shells out to `git commit` rather than using git2 directly so that
//! pre-commit and commit-msg hooks still run.

use git2::Repository;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum CommitError {
    #[error("pre-commit hook failed")]
    PreCommitFailed,

    #[error("commit-msg hook failed")]
    CommitMsgFailed,

    #[error("git error: {0}")]
    Git(String),

    #[error("temp file error: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("failed to parse commit output")]
    Parse,
}

#[derive(Debug, Default)]
pub struct CommitOptions {
    /// Skip pre-commit and commit-msg hooks.
    pub no_verify: bool,
}

#[derive(Debug)]
pub struct CommitResult {
    /// The new commit's object ID as printed by git.
    pub oid: String,
}

/// Whether a run should write a commit: only when enabled by `--commit` or the
/// config file, and never on a dry run.
pub fn should_commit(config: &Config, dry_run: bool) -> bool {
    config.commit && !dry_run
}

/// Commit the staged index with `message` by running `git commit -F`.
pub fn create_commit(
    repo: &Repository,
    message: &str,
    options: &CommitOptions,
) -> Result<CommitResult, CommitError> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| CommitError::Git("bare repository".to_string()))?;

    let mut temp_file = NamedTempFile::new().map_err(CommitError::TempFile)?;
    temp_file
        .write_all(message.as_bytes())
        .map_err(CommitError::TempFile)?;
    temp_file.flush().map_err(CommitError::TempFile)?;

    let mut cmd = Command::new("git");
    cmd.current_dir(workdir);
    cmd.arg("commit");
    cmd.arg("-F");
    cmd.arg(temp_file.path());

    if options.no_verify {
        cmd.arg("--no-verify");
    }

    let output = cmd
        .output()
        .map_err(|e| CommitError::Git(format!("failed to execute git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let combined = format!("{}{}", stdout, stderr);
        return Err(classify_failure(output.status.code(), &combined));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let oid = parse_commit_hash(&stdout).ok_or(CommitError::Parse)?;
    info!(%oid, "created commit");

    Ok(CommitResult { oid })
}

/// Work out which hook, if any, rejected the commit.
fn classify_failure(code: Option<i32>, output: &str) -> CommitError {
    if code == Some(1) {
        let lower = output.to_lowercase();
        if lower.contains("pre-commit") {
            return CommitError::PreCommitFailed;
        }
        if lower.contains("commit-msg") {
            return CommitError::CommitMsgFailed;
        }
        // pre-commit runs first, so an unexplained exit 1 is most likely it
        if !lower.contains("nothing to commit") && !lower.contains("no changes") {
            return CommitError::PreCommitFailed;
        }
    }

    CommitError::Git(output.trim().to_string())
}

/// Parse the commit hash from git commit output.
///
/// Git prints something like:
/// - `[main abc1234] commit message`
/// - `[main (root-commit) abc1234] commit message`
fn parse_commit_hash(output: &str) -> Option<String> {
    output.lines().map(str::trim).find_map(|line| {
        let (inside, _) = line.strip_prefix('[')?.split_once(']')?;
        let hash = inside.split_whitespace().last()?;
        if hash.len() >= 7 && hash.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(hash.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::{create_and_stage_file, setup_test_repo};

    #[test]
    fn test_parse_commit_hash_normal() {
        let output = "[main abc1234] fix: some commit message\n";
        assert_eq!(parse_commit_hash(output), Some("abc1234".to_string()));
    }

    #[test]
    fn test_parse_commit_hash_root_commit() {
        let output = "[main (root-commit) def5678] feat: initial commit\n";
        assert_eq!(parse_commit_hash(output), Some("def5678".to_string()));
    }

    #[test]
    fn test_parse_commit_hash_after_noise() {
        let output = "hint: something\n[feature/x 1234567] feat: add feature\n 1 file changed\n";
        assert_eq!(parse_commit_hash(output), Some("1234567".to_string()));
    }

    #[test]
    fn test_parse_commit_hash_no_match() {
        assert_eq!(parse_commit_hash("error: something went wrong\n"), None);
        assert_eq!(parse_commit_hash("[main nothex!] x\n"), None);
    }

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            classify_failure(Some(1), "pre-commit hook exited with 1"),
            CommitError::PreCommitFailed
        ));
        assert!(matches!(
            classify_failure(Some(1), "commit-msg rejected the message"),
            CommitError::CommitMsgFailed
        ));
        assert!(matches!(
            classify_failure(Some(1), "nothing to commit, working tree clean\n"),
            CommitError::Git(msg) if msg == "nothing to commit, working tree clean"
        ));
        assert!(matches!(
            classify_failure(Some(128), "fatal: not a git repository"),
            CommitError::Git(_)
        ));
    }

    #[test]
    fn test_bare_repository_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init_bare(temp_dir.path()).unwrap();

        let result = create_commit(&repo, "feat: x", &CommitOptions::default());
        assert!(matches!(result, Err(CommitError::Git(msg)) if msg == "bare repository"));
    }

    #[test]
    fn test_should_commit_requires_opt_in() {
        let disabled = Config::default();
        let enabled = Config {
            commit: true,
            ..Config::default()
        };

        assert!(!should_commit(&disabled, false));
        assert!(!should_commit(&disabled, true));
        assert!(should_commit(&enabled, false));
        assert!(!should_commit(&enabled, true));
    }

    #[test]
    fn test_create_commit_in_repository() {
        let (_temp_dir, repo) = setup_test_repo();
        create_and_stage_file(&repo, "a.txt", "a");

        let result = create_commit(&repo, "feat: add a", &CommitOptions::default()).unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert!(head.id().to_string().starts_with(&result.oid));
        assert_eq!(head.message().map(str::trim_end), Some("feat: add a"));
    }
}
