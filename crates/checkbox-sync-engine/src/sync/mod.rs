//! # Checkbox Synchronization
//!
//! Turns an edited document back into a consistent one: when a checkbox is
//! toggled, its descendants follow, and every parent reflects its children.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`line`): each raw line becomes a `Line`
//!    (checkbox, list item or plain text) with its verbatim indent.
//! 2. **Tree Construction** (`tree`): an indent stack nests lines into a
//!    `Forest` stored as an arena in document order.
//! 3. **Change Location** (`locate`): comparing against the previous snapshot
//!    finds at most one toggled checkbox, the trigger.
//! 4. **Propagation** (`propagate`): the trigger's state flows down its
//!    subtree, then every parent is re-aggregated bottom-up.
//! 5. **Rendering** (`render`): the forest is written back as text.
//!
//! ## Key Invariants
//!
//! - Rendering an unmutated forest reproduces the input byte-for-byte
//! - Ignored checkboxes are never mutated and never count toward a parent
//! - Only a single-line, text-preserving toggle propagates downward

pub mod line;
pub mod locate;
pub mod propagate;
pub mod render;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
mod tests;

pub use line::{CheckboxLine, Indent, Line, LineClassifier, ListItemLine, Marker, TextLine};
pub use locate::{locate_trigger, single_changed_line};
pub use propagate::{propagate_down, propagate_up};
pub use render::render;
pub use tree::{Forest, NodeId, TreeNode};

use crate::settings::Settings;

/// Classifies and nests every line of `text`.
pub fn parse_forest(text: &str, settings: &Settings) -> Forest {
    let classifier = LineClassifier::new(settings);
    Forest::build(text.split('\n').map(|raw| classifier.classify(raw)))
}

/// Computes the consistent version of `current`.
///
/// `previous` is the text last seen for the same document, if any. With a
/// previous snapshot, a single toggled checkbox pushes its state to its
/// descendants; parents are always re-aggregated from their children when
/// enabled. Returns `current` unchanged when nothing needs to change.
pub fn sync_text(current: &str, previous: Option<&str>, settings: &Settings) -> String {
    if previous == Some(current) {
        return current.to_string();
    }

    let classifier = LineClassifier::new(settings);
    let current_lines: Vec<&str> = current.split('\n').collect();
    let previous_lines: Option<Vec<&str>> = previous.map(|text| text.split('\n').collect());

    let mut forest = Forest::build(current_lines.iter().map(|raw| classifier.classify(raw)));
    let mut changed = 0;

    if settings.enable_automatic_child_state()
        && let Some(trigger) =
            locate_trigger(previous_lines.as_deref(), &current_lines, &classifier)
    {
        changed += propagate_down(&mut forest, NodeId(trigger), settings);
    }

    if settings.enable_automatic_parent_state() {
        changed += propagate_up(&mut forest, settings);
    }

    if changed == 0 {
        return current.to_string();
    }
    render(&forest)
}
