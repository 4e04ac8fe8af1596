//! # Sync Pipeline
//!
//! Hosts feed every document change through a [`SyncPipeline`]. It remembers
//! the last text it produced for each path so the next call can tell which
//! checkbox the user toggled:
//!
//! 1. Look up the previous snapshot for the path.
//! 2. Synchronize, unless the path filter excludes the document.
//! 3. Store the result as the new snapshot and return it.
//!
//! [`InMemorySnapshotStore`] serializes as a flat path-to-text map so hosts
//! that exit between runs can persist it and still detect toggles made while
//! they were not running.

use std::collections::BTreeMap;

use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::filter::PathFilter;
use crate::settings::Settings;
use crate::sync::sync_text;

/// Last known text per document.
pub trait SnapshotStore {
    fn get(&self, path: &RelativePath) -> Option<String>;

    fn set(&mut self, path: &RelativePath, text: String);

    /// Stores `text` only if nothing is stored for `path` yet. Returns whether
    /// it stored.
    fn init_if_needed(&mut self, path: &RelativePath, text: &str) -> bool {
        if self.get(path).is_some() {
            return false;
        }
        self.set(path, text.to_string());
        true
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemorySnapshotStore {
    snapshots: BTreeMap<RelativePathBuf, String>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Forgets the snapshot for a document that no longer exists.
    pub fn remove(&mut self, path: &RelativePath) -> Option<String> {
        self.snapshots.remove(path)
    }

    /// Keeps only the snapshots whose path satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&RelativePath) -> bool) {
        self.snapshots.retain(|path, _| keep(path));
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn get(&self, path: &RelativePath) -> Option<String> {
        self.snapshots.get(path).cloned()
    }

    fn set(&mut self, path: &RelativePath, text: String) {
        self.snapshots.insert(path.to_relative_path_buf(), text);
    }
}

pub struct SyncPipeline<S = InMemorySnapshotStore> {
    settings: Settings,
    filter: PathFilter,
    store: S,
}

impl SyncPipeline<InMemorySnapshotStore> {
    pub fn new(settings: Settings, filter: PathFilter) -> Self {
        Self::with_store(settings, filter, InMemorySnapshotStore::new())
    }
}

impl<S: SnapshotStore> SyncPipeline<S> {
    pub fn with_store(settings: Settings, filter: PathFilter, store: S) -> Self {
        Self {
            settings,
            filter,
            store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Swaps the configuration; stored snapshots survive.
    pub fn update_settings(&mut self, settings: Settings, filter: PathFilter) {
        self.settings = settings;
        self.filter = filter;
    }

    /// Records `text` as the baseline for `path` if none exists, e.g. when a
    /// document is first opened.
    pub fn open(&mut self, path: &RelativePath, text: &str) -> bool {
        self.store.init_if_needed(path, text)
    }

    /// Synchronizes `current` against the stored snapshot for `path`.
    pub fn apply(&mut self, current: &str, path: &RelativePath) -> String {
        let previous = self.store.get(path);

        let result = if self.filter.is_allowed(path) {
            sync_text(current, previous.as_deref(), &self.settings)
        } else {
            log::info!("skipping {path}: excluded by path rules");
            current.to_string()
        };

        self.store.set(path, result.clone());
        result
    }
}
