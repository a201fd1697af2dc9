use git2::{Diff, ErrorCode, Patch, Repository, Tree};
use thiserror::Error;
use tracing::{debug, warn};

use crate::changes::{ChangeRecord, ChangeStatus};

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to resolve HEAD: {0}")]
    Head(#[source] git2::Error),

    #[error("Failed to get repository diff: {0}")]
    Diff(#[source] git2::Error),

    #[error("Failed to format patch for {path}: {source}")]
    Patch {
        path: String,
        #[source]
        source: git2::Error,
    },
}

/// Open the repository containing `path`.
pub fn open_repository(path: &std::path::Path) -> Result<Repository, GitError> {
    Repository::discover(path).map_err(GitError::OpenRepository)
}

/// HEAD's tree, or `None` when the branch has no commits yet.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::Head(e)),
    };

    head.peel_to_tree().map(Some).map_err(GitError::Head)
}

/// Collect one record per file staged in the index, in diff order.
///
/// Each record's patch is cut to `max_diff_chars` characters. An empty
/// result means nothing is staged.
pub fn get_staged_changes(
    repo: &Repository,
    max_diff_chars: usize,
) -> Result<Vec<ChangeRecord>, GitError> {
    let tree = resolve_head_tree(repo)?;

    let mut diff = repo
        .diff_tree_to_index(tree.as_ref(), None, None)
        .map_err(GitError::Diff)?;
    diff.find_similar(None).map_err(GitError::Diff)?;

    let changes = collect_records(&diff, max_diff_chars)?;
    debug!(files = changes.len(), "collected staged changes");
    Ok(changes)
}

fn collect_records(diff: &Diff<'_>, max_diff_chars: usize) -> Result<Vec<ChangeRecord>, GitError> {
    let mut changes = Vec::with_capacity(diff.deltas().len());

    for (idx, delta) in diff.deltas().enumerate() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let patch_text = match Patch::from_diff(diff, idx) {
            Ok(Some(mut patch)) => {
                let buf = patch.to_buf().map_err(|source| GitError::Patch {
                    path: path.clone(),
                    source,
                })?;
                String::from_utf8_lossy(&buf).into_owned()
            }
            Ok(None) => String::new(),
            Err(source) => {
                warn!(%path, error = %source, "could not build patch, sending without diff");
                String::new()
            }
        };

        changes.push(ChangeRecord::new(
            path,
            ChangeStatus::from(delta.status()),
            &patch_text,
            max_diff_chars,
        ));
    }

    Ok(changes)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::changes::{MAX_DIFF_CHARS, TRUNCATION_MARKER};
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_nothing_staged_in_empty_repo() {
        let (_temp_dir, repo) = setup_test_repo();
        let changes = get_staged_changes(&repo, MAX_DIFF_CHARS).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_nothing_staged_after_commit() {
        let (_temp_dir, repo) = setup_test_repo();
        create_and_stage_file(&repo, "test.txt", "Hello");
        commit_all(&repo, "Initial commit");

        let changes = get_staged_changes(&repo, MAX_DIFF_CHARS).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_new_file_on_unborn_branch() {
        let (_temp_dir, repo) = setup_test_repo();
        create_and_stage_file(&repo, "hello.txt", "Hello, World!");

        let changes = get_staged_changes(&repo, MAX_DIFF_CHARS).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "hello.txt");
        assert_eq!(changes[0].status, ChangeStatus::Added);
        assert!(changes[0].diff.contains("+Hello, World!"));
    }

    #[test]
    fn test_modified_and_deleted_files() {
        let (_temp_dir, repo) = setup_test_repo();
        create_and_stage_file(&repo, "keep.txt", "Initial content");
        create_and_stage_file(&repo, "gone.txt", "Soon removed");
        commit_all(&repo, "Initial commit");

        create_and_stage_file(&repo, "keep.txt", "Modified content");
        remove_and_stage_file(&repo, "gone.txt");

        let changes = get_staged_changes(&repo, MAX_DIFF_CHARS).unwrap();
        assert_eq!(changes.len(), 2);

        let gone = changes.iter().find(|c| c.path == "gone.txt").unwrap();
        assert_eq!(gone.status, ChangeStatus::Deleted);
        assert!(gone.diff.contains("-Soon removed"));

        let keep = changes.iter().find(|c| c.path == "keep.txt").unwrap();
        assert_eq!(keep.status, ChangeStatus::Modified);
        assert!(keep.diff.contains("-Initial content"));
        assert!(keep.diff.contains("+Modified content"));
    }

    #[test]
    fn test_unstaged_changes_are_ignored() {
        let (_temp_dir, repo) = setup_test_repo();
        create_and_stage_file(&repo, "staged.txt", "Staged content");
        commit_all(&repo, "Initial commit");

        let path = repo.workdir().unwrap().join("staged.txt");
        let mut file = File::create(path).unwrap();
        writeln!(file, "Unstaged edit").unwrap();

        let changes = get_staged_changes(&repo, MAX_DIFF_CHARS).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_long_patch_is_truncated() {
        let (_temp_dir, repo) = setup_test_repo();

        let mut content = String::new();
        for i in 0..200 {
            content.push_str(&format!("Line {}\n", i));
        }
        create_and_stage_file(&repo, "long.txt", &content);

        let changes = get_staged_changes(&repo, MAX_DIFF_CHARS).unwrap();
        let diff = &changes[0].diff;
        assert!(diff.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            diff.chars().count(),
            MAX_DIFF_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert!(!diff.contains("Line 199"));
    }

    #[test]
    fn test_custom_diff_budget() {
        let (_temp_dir, repo) = setup_test_repo();
        create_and_stage_file(&repo, "small.txt", "abcdefghij");

        let changes = get_staged_changes(&repo, 10).unwrap();
        assert!(changes[0].diff.ends_with(TRUNCATION_MARKER));
        assert_eq!(changes[0].diff.chars().count(), 10 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_open_repository_rejects_plain_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = open_repository(&temp_dir.path().join("missing"));
        assert!(matches!(result, Err(GitError::OpenRepository(_))));
    }
}
