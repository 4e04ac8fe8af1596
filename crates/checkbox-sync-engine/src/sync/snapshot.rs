//! # Tree Outline
//!
//! A stable, human-readable dump of a [`Forest`] for snapshot tests and the
//! CLI `inspect` command. One line per node, indented two spaces per depth:
//!
//! ```text
//! Checkbox(Unchecked) indent=0 `P`
//!   Text indent=2 `Plain child`
//!   Checkbox(Checked) indent=2 `C`
//! ```

use super::line::Line;
use super::tree::Forest;

pub fn outline(forest: &Forest) -> String {
    forest
        .nodes()
        .map(|(id, node)| {
            let pad = "  ".repeat(forest.depth(id));
            let (kind, text) = match &node.line {
                Line::Checkbox(cb) => (format!("Checkbox({:?})", cb.state()), &cb.text),
                Line::ListItem(item) => (format!("ListItem({})", item.marker), &item.text),
                Line::Text(text) => ("Text".to_string(), &text.text),
            };
            format!("{pad}{kind} indent={} `{text}`", node.line.indent().width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
