use super::line::Line;
use super::tree::Forest;

impl Line {
    /// Writes the line back in its source form.
    ///
    /// Unmutated lines reproduce their input exactly; a mutated checkbox differs
    /// only in its check character.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Line::Checkbox(cb) => {
                out.push_str(&cb.indent.prefix);
                cb.marker.write_to(out);
                out.push_str(" [");
                out.push(cb.check_char());
                out.push_str("] ");
                out.push_str(&cb.text);
            }
            Line::ListItem(item) => {
                out.push_str(&item.indent.prefix);
                item.marker.write_to(out);
                out.push_str(&item.gap);
                out.push_str(&item.text);
            }
            Line::Text(text) => {
                out.push_str(&text.indent.prefix);
                out.push_str(&text.text);
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Renders the forest in pre-order, which is document order, joined by `\n`.
pub fn render(forest: &Forest) -> String {
    let mut out = String::new();
    for (id, node) in forest.nodes() {
        if id.0 > 0 {
            out.push('\n');
        }
        node.line.write_to(&mut out);
    }
    out
}
