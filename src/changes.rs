//! Per-file change records extracted from the staged index.

use std::fmt;

/// Maximum number of diff characters kept per file by default.
pub const MAX_DIFF_CHARS: usize = 800;

/// Marker appended to a diff that was cut down to the character budget.
pub const TRUNCATION_MARKER: &str = "\n[Diff truncated...]";

/// Line written after every rendered record.
pub const RECORD_SEPARATOR: &str = "-------------------";

/// Kind of change git reports for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    Ignored,
    Untracked,
    TypeChanged,
    Unreadable,
    Conflicted,
    Unmodified,
}

impl From<git2::Delta> for ChangeStatus {
    fn from(delta: git2::Delta) -> Self {
        match delta {
            git2::Delta::Added => ChangeStatus::Added,
            git2::Delta::Deleted => ChangeStatus::Deleted,
            git2::Delta::Modified => ChangeStatus::Modified,
            git2::Delta::Renamed => ChangeStatus::Renamed,
            git2::Delta::Copied => ChangeStatus::Copied,
            git2::Delta::Ignored => ChangeStatus::Ignored,
            git2::Delta::Untracked => ChangeStatus::Untracked,
            git2::Delta::Typechange => ChangeStatus::TypeChanged,
            git2::Delta::Unreadable => ChangeStatus::Unreadable,
            git2::Delta::Conflicted => ChangeStatus::Conflicted,
            git2::Delta::Unmodified => ChangeStatus::Unmodified,
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeStatus::Added => "Added",
            ChangeStatus::Deleted => "Deleted",
            ChangeStatus::Modified => "Modified",
            ChangeStatus::Renamed => "Renamed",
            ChangeStatus::Copied => "Copied",
            ChangeStatus::Ignored => "Ignored",
            ChangeStatus::Untracked => "Untracked",
            ChangeStatus::TypeChanged => "TypeChanged",
            ChangeStatus::Unreadable => "Unreadable",
            ChangeStatus::Conflicted => "Conflicted",
            ChangeStatus::Unmodified => "Unmodified",
        };
        f.write_str(name)
    }
}

/// One staged file: its path, what happened to it, and a bounded patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    pub status: ChangeStatus,
    pub diff: String,
}

impl ChangeRecord {
    /// Build a record, truncating `diff` to `max_diff_chars` characters.
    pub fn new(
        path: impl Into<String>,
        status: ChangeStatus,
        diff: &str,
        max_diff_chars: usize,
    ) -> Self {
        Self {
            path: path.into(),
            status,
            diff: truncate_diff(diff, max_diff_chars),
        }
    }
}

/// Renders the record as the four prompt lines plus the separator line.
impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path)?;
        writeln!(f, "Change kind: {}", self.status)?;
        writeln!(f, "Diff:")?;
        writeln!(f, "{}", self.diff)?;
        f.write_str(RECORD_SEPARATOR)
    }
}

/// Cut `diff` to at most `max_chars` characters, marking the cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
            truncated.push_str(&diff[..cut]);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => diff.to_string(),
    }
}

/// Render every record in order, one block per file.
pub fn render(changes: &[ChangeRecord]) -> String {
    changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_diff_is_unchanged() {
        let diff = "+fn main() {}\n";
        assert_eq!(truncate_diff(diff, MAX_DIFF_CHARS), diff);
    }

    #[test]
    fn test_diff_at_limit_is_unchanged() {
        let diff = "a".repeat(MAX_DIFF_CHARS);
        assert_eq!(truncate_diff(&diff, MAX_DIFF_CHARS), diff);
    }

    #[test]
    fn test_long_diff_is_truncated_with_marker() {
        let diff = "b".repeat(MAX_DIFF_CHARS + 1);
        let truncated = truncate_diff(&diff, MAX_DIFF_CHARS);

        assert!(truncated.ends_with(TRUNCATION_MARKER));
        let body = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(body.chars().count(), MAX_DIFF_CHARS);
        assert_eq!(
            truncated.chars().count(),
            MAX_DIFF_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_truncation_respects_multibyte_characters() {
        let diff = "é".repeat(10);
        let truncated = truncate_diff(&diff, 4);
        assert_eq!(truncated, format!("éééé{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_record_rendering() {
        let record = ChangeRecord::new("src/lib.rs", ChangeStatus::Modified, "+pub mod x;", 800);
        assert_eq!(
            record.to_string(),
            "File: src/lib.rs\nChange kind: Modified\nDiff:\n+pub mod x;\n-------------------"
        );
    }

    #[test]
    fn test_render_joins_records_in_order() {
        let changes = vec![
            ChangeRecord::new("a.txt", ChangeStatus::Added, "+a", 800),
            ChangeRecord::new("b.txt", ChangeStatus::Deleted, "-b", 800),
        ];
        let rendered = render(&changes);
        let a = rendered.find("File: a.txt").unwrap();
        let b = rendered.find("File: b.txt").unwrap();
        assert!(a < b);
        assert!(rendered.contains("-------------------\nFile: b.txt"));
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn test_status_from_delta() {
        assert_eq!(ChangeStatus::from(git2::Delta::Added), ChangeStatus::Added);
        assert_eq!(
            ChangeStatus::from(git2::Delta::Typechange),
            ChangeStatus::TypeChanged
        );
        assert_eq!(ChangeStatus::Renamed.to_string(), "Renamed");
    }
}
