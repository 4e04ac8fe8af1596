use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Path is not inside the notes directory: {0}")]
    InvalidPath(PathBuf),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    Ok(fs::read_to_string(&absolute_path)?)
}

/// Write content to a markdown file, creating parent directories
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    Ok(fs::write(&absolute_path, content)?)
}

/// Markdown files below `notes_root`, relative to it and sorted.
///
/// Hidden files and directories (`.git`, `.obsidian`, ...) are skipped.
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_notes_dir(notes_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, notes_root, &mut files)?;
    files.sort();
    log::debug!(
        "found {} markdown file(s) in {}",
        files.len(),
        notes_root.display()
    );
    Ok(files)
}

fn scan_directory_recursive(
    notes_root: &Path,
    dir: &Path,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(notes_root, &path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(relative_to(notes_root, &path)?);
        }
    }

    Ok(())
}

/// Whether `path` is a note that [`scan_markdown_files`] would list.
pub fn is_markdown_note(path: &RelativePath) -> bool {
    path.extension() == Some("md")
        && path
            .components()
            .all(|component| !component.as_str().starts_with('.'))
}

/// `path` expressed relative to `notes_root`.
pub fn relative_to(notes_root: &Path, path: &Path) -> Result<RelativePathBuf, IoError> {
    let stripped = path
        .strip_prefix(notes_root)
        .map_err(|_| IoError::InvalidPath(path.to_path_buf()))?;
    RelativePathBuf::from_path(stripped).map_err(|_| IoError::InvalidPath(path.to_path_buf()))
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() {
        return Err(IoError::InvalidNotesDir(format!(
            "notes directory not found: {}",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(IoError::InvalidNotesDir(format!(
            "not a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
