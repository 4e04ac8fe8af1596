use crate::settings::{CheckboxState, Settings};

use super::line::Line;
use super::tree::{Forest, NodeId};

/// Pushes the trigger's state into its descendants.
///
/// Ignored checkboxes freeze their whole subtree. Plain list items and text
/// lines are transparent: they are not mutated, but their children are still
/// visited. Nodes outside the trigger's subtree are never touched.
///
/// Returns the number of lines whose state changed.
pub fn propagate_down(forest: &mut Forest, trigger: NodeId, settings: &Settings) -> usize {
    let state = forest.node(trigger).line.state();
    if !state.is_relevant() {
        log::debug!("not propagating {state:?} from line {} to children", trigger.0);
        return 0;
    }

    let mut changed = 0;
    let mut pending: Vec<NodeId> = forest.node(trigger).children.iter().rev().copied().collect();

    while let Some(id) = pending.pop() {
        match forest.line_mut(id) {
            Line::Checkbox(cb) if cb.state() == CheckboxState::Ignore => continue,
            Line::Checkbox(cb) => {
                if cb.set_state(state, settings) {
                    changed += 1;
                }
            }
            Line::ListItem(_) | Line::Text(_) => {}
        }
        pending.extend(forest.node(id).children.iter().rev().copied());
    }

    log::debug!(
        "propagated {state:?} from line {} to {changed} descendant(s)",
        trigger.0
    );
    changed
}

/// Recomputes every node's state from its descendants, children first.
///
/// A node with at least one relevant (checked or unchecked) child becomes
/// checked only if all relevant children are checked. Ignored nodes keep their
/// state and are excluded from their parent's aggregate. A plain node relays
/// its children's aggregate upward without being mutated itself.
///
/// Returns the number of lines whose state changed.
pub fn propagate_up(forest: &mut Forest, settings: &Settings) -> usize {
    let mut resolved = vec![CheckboxState::NoCheckbox; forest.len()];
    let mut changed = 0;

    // Children always have larger ids than their parents.
    let ids: Vec<NodeId> = forest.nodes().map(|(id, _)| id).rev().collect();
    for id in ids {
        let aggregate = aggregate_children(forest, id, &resolved);
        let line = forest.line_mut(id);

        resolved[id.0] = match (line.state(), aggregate) {
            (CheckboxState::Ignore, _) | (_, None) => line.state(),
            (_, Some(aggregate)) => {
                if let Some(cb) = line.as_checkbox_mut()
                    && cb.set_state(aggregate, settings)
                {
                    log::trace!("line {} aggregated to {aggregate:?}", id.0);
                    changed += 1;
                }
                aggregate
            }
        };
    }

    log::debug!("parent aggregation changed {changed} line(s)");
    changed
}

/// AND over the relevant resolved states of `id`'s children, or `None` when no
/// child is relevant.
fn aggregate_children(
    forest: &Forest,
    id: NodeId,
    resolved: &[CheckboxState],
) -> Option<CheckboxState> {
    let mut relevant = forest
        .node(id)
        .children
        .iter()
        .map(|child| resolved[child.0])
        .filter(|state| state.is_relevant())
        .peekable();

    relevant.peek()?;
    if relevant.any(|state| state == CheckboxState::Unchecked) {
        Some(CheckboxState::Unchecked)
    } else {
        Some(CheckboxState::Checked)
    }
}
