//! Shared helpers for tests that need a notes directory on disk.

use std::path::PathBuf;

use tempfile::TempDir;

pub fn create_test_notes_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes `content` to `name` inside the notes directory and returns its full path.
pub fn create_test_file(notes_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = notes_dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
