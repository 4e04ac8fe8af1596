//! Snapshots kept between runs under `<notes>/.checkbox-sync/`.
//!
//! Without them every `sync` would see each document for the first time and
//! could only aggregate upward, undoing a parent the user just checked.

use anyhow::{Context, Result};
use checkbox_sync_engine::InMemorySnapshotStore;
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_DIR: &str = ".checkbox-sync";
const SNAPSHOT_FILE: &str = "snapshots.toml";

pub fn snapshot_path(notes_root: &Path) -> PathBuf {
    notes_root.join(SNAPSHOT_DIR).join(SNAPSHOT_FILE)
}

/// Loads the stored snapshots, or an empty store on the first run.
pub fn load(notes_root: &Path) -> Result<InMemorySnapshotStore> {
    let path = snapshot_path(notes_root);
    if !path.exists() {
        log::debug!("no snapshots at {}", path.display());
        return Ok(InMemorySnapshotStore::new());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshots {}", path.display()))?;
    let store: InMemorySnapshotStore = toml::from_str(&content)
        .with_context(|| format!("Failed to parse snapshots {}", path.display()))?;
    log::debug!("loaded {} snapshot(s) from {}", store.len(), path.display());
    Ok(store)
}

pub fn save(notes_root: &Path, store: &InMemorySnapshotStore) -> Result<()> {
    let path = snapshot_path(notes_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string(store)?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write snapshots {}", path.display()))?;
    log::debug!("saved {} snapshot(s) to {}", store.len(), path.display());
    Ok(())
}
