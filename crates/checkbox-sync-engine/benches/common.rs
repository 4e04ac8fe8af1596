// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_checklist(roots: usize, depth: usize, fanout: usize) -> String {
    let mut lines = Vec::new();

    for root in 0..roots {
        lines.push(format!("# Project {root}"));
        lines.push(String::new());
        push_subtree(&mut lines, 0, depth, fanout, root);
        lines.push(String::new());
    }

    lines.join("\n")
}

#[allow(dead_code)]
fn push_subtree(lines: &mut Vec<String>, level: usize, depth: usize, fanout: usize, seed: usize) {
    let indent = "  ".repeat(level);
    let symbol = if seed % 3 == 0 { ' ' } else { 'x' };
    lines.push(format!("{indent}- [{symbol}] Task {seed} at level {level}"));

    if level + 1 == depth {
        return;
    }

    // Mix in plain items and notes so classification sees every line kind
    lines.push(format!("{indent}  Notes for task {seed}"));
    lines.push(format!("{indent}  - Reference link {seed}"));
    for child in 0..fanout {
        push_subtree(lines, level + 1, depth, fanout, seed * fanout + child + 1);
    }
}

/// Toggles the first checkbox of `text`, returning the edited copy.
#[allow(dead_code)]
pub fn toggle_first_checkbox(text: &str) -> String {
    if let Some(pos) = text.find("- [ ]") {
        let mut edited = text.to_string();
        edited.replace_range(pos + 3..pos + 4, "x");
        edited
    } else {
        text.replacen("- [x]", "- [ ]", 1)
    }
}
