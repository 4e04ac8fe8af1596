pub mod edits;
pub mod filter;
pub mod io;
pub mod pipeline;
pub mod settings;
pub mod sync;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use edits::{EditError, LineEdit, apply_line_edits, line_edits};
pub use filter::{PathFilter, PathFilterError};
pub use io::*;
pub use pipeline::{InMemorySnapshotStore, SnapshotStore, SyncPipeline};
pub use settings::{CheckboxState, Settings, SettingsBuilder, SettingsError, SymbolSet};
pub use sync::{parse_forest, sync_text};
