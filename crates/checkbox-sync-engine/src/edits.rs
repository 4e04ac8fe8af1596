//! Line-level edits between two versions of a document.
//!
//! Synchronization only ever rewrites check characters, so a result always has
//! the same line count as its input. Editors apply the difference as a list of
//! whole-line replacements instead of rewriting the buffer.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("line count changed from {old} to {new}")]
    LineCountMismatch { old: usize, new: usize },
}

/// Replace line `line` (0-based) with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub line: usize,
    pub text: String,
}

/// Lists every line of `new` that differs from `old`, in ascending order.
pub fn line_edits(old: &str, new: &str) -> Result<Vec<LineEdit>, EditError> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    if old_lines.len() != new_lines.len() {
        return Err(EditError::LineCountMismatch {
            old: old_lines.len(),
            new: new_lines.len(),
        });
    }

    Ok(old_lines
        .iter()
        .zip(&new_lines)
        .enumerate()
        .filter(|(_, (before, after))| before != after)
        .map(|(line, (_, after))| LineEdit {
            line,
            text: after.to_string(),
        })
        .collect())
}

/// Applies `edits` to `old`. Edits past the last line are ignored.
pub fn apply_line_edits(old: &str, edits: &[LineEdit]) -> String {
    let mut lines: Vec<&str> = old.split('\n').collect();
    for edit in edits {
        if let Some(line) = lines.get_mut(edit.line) {
            *line = edit.text.as_str();
        }
    }
    lines.join("\n")
}
