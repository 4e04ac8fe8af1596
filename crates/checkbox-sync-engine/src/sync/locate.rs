use super::line::{Line, LineClassifier};

/// Index of the only raw line that differs between the two snapshots.
///
/// Returns `None` when there is no previous snapshot, when the line counts
/// differ, or when zero or several lines differ.
pub fn single_changed_line(previous: Option<&[&str]>, current: &[&str]) -> Option<usize> {
    let previous = previous?;
    if previous.len() != current.len() {
        return None;
    }

    let mut changed = previous
        .iter()
        .zip(current)
        .enumerate()
        .filter(|(_, (before, after))| before != after)
        .map(|(index, _)| index);

    let first = changed.next()?;
    match changed.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// Finds the line whose checkbox the user toggled, if that is the only edit.
///
/// The single changed line counts as a trigger only when both versions are
/// checkboxes with identical indent, marker and text and different states.
/// Retyping, re-indenting or editing text never triggers propagation.
pub fn locate_trigger(
    previous: Option<&[&str]>,
    current: &[&str],
    classifier: &LineClassifier<'_>,
) -> Option<usize> {
    let index = single_changed_line(previous, current)?;
    let before = classifier.classify(previous?[index]);
    let after = classifier.classify(current[index]);

    match (&before, &after) {
        (Line::Checkbox(before), Line::Checkbox(after))
            if before.indent.prefix == after.indent.prefix
                && before.marker == after.marker
                && before.text == after.text
                && before.state() != after.state() =>
        {
            log::debug!(
                "line {index} toggled from {:?} to {:?}",
                before.state(),
                after.state()
            );
            Some(index)
        }
        _ => {
            log::trace!("line {index} changed but is not a checkbox toggle");
            None
        }
    }
}
