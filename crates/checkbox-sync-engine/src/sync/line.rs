use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::settings::{CheckboxState, Settings};

/// The list marker that opens a list item or checkbox line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Dash,     // "-"
    Asterisk, // "*"
    Plus,     // "+"
    /// "1.", "10.", "007." - digits kept verbatim so the line round-trips.
    Numbered(String),
}

impl Marker {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "-" => Some(Marker::Dash),
            "*" => Some(Marker::Asterisk),
            "+" => Some(Marker::Plus),
            _ => {
                let digits = s.strip_suffix('.')?;
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    Some(Marker::Numbered(digits.to_string()))
                } else {
                    None
                }
            }
        }
    }

    /// Appends the marker's source text to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Marker::Dash => out.push('-'),
            Marker::Asterisk => out.push('*'),
            Marker::Plus => out.push('+'),
            Marker::Numbered(digits) => {
                out.push_str(digits);
                out.push('.');
            }
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Dash => f.write_str("-"),
            Marker::Asterisk => f.write_str("*"),
            Marker::Plus => f.write_str("+"),
            Marker::Numbered(digits) => write!(f, "{digits}."),
        }
    }
}

/// Leading whitespace of a line, kept verbatim, plus its expanded width.
///
/// A carriage return never counts as indentation, so a blank `"\r"` line of
/// a CRLF document closes open subtrees like an empty line does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    pub prefix: String,
    /// Columns after expanding each tab to `tab_size` and any other whitespace to 1.
    pub width: usize,
}

impl Indent {
    pub fn new(prefix: &str, tab_size: usize) -> Self {
        let width = prefix
            .chars()
            .map(|c| if c == '\t' { tab_size } else { 1 })
            .fold(0, usize::saturating_add);
        Self {
            prefix: prefix.to_string(),
            width,
        }
    }
}

/// `- [x] text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxLine {
    pub indent: Indent,
    pub marker: Marker,
    check_char: char,
    state: CheckboxState,
    /// Everything after `] `.
    pub text: String,
}

impl CheckboxLine {
    pub fn check_char(&self) -> char {
        self.check_char
    }

    pub fn state(&self) -> CheckboxState {
        self.state
    }

    /// Moves the checkbox to `state`, rewriting its symbol.
    ///
    /// Returns false and leaves the original symbol untouched if the state is
    /// already `state`, so unchanged lines render byte-for-byte.
    pub fn set_state(&mut self, state: CheckboxState, settings: &Settings) -> bool {
        if self.state == state {
            return false;
        }
        self.check_char = settings.symbol_for(state);
        self.state = state;
        true
    }
}

/// `- text` with no checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemLine {
    pub indent: Indent,
    pub marker: Marker,
    /// Whitespace between the marker and the text.
    pub gap: String,
    pub text: String,
}

/// Any line that is neither a checkbox nor a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub indent: Indent,
    pub text: String,
}

/// One classified line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Checkbox(CheckboxLine),
    ListItem(ListItemLine),
    Text(TextLine),
}

impl Line {
    pub fn indent(&self) -> &Indent {
        match self {
            Line::Checkbox(cb) => &cb.indent,
            Line::ListItem(item) => &item.indent,
            Line::Text(text) => &text.indent,
        }
    }

    /// The line's own state; `NoCheckbox` for list items and text.
    pub fn state(&self) -> CheckboxState {
        match self {
            Line::Checkbox(cb) => cb.state,
            Line::ListItem(_) | Line::Text(_) => CheckboxState::NoCheckbox,
        }
    }

    pub fn as_checkbox(&self) -> Option<&CheckboxLine> {
        match self {
            Line::Checkbox(cb) => Some(cb),
            _ => None,
        }
    }

    pub fn as_checkbox_mut(&mut self) -> Option<&mut CheckboxLine> {
        match self {
            Line::Checkbox(cb) => Some(cb),
            _ => None,
        }
    }
}

fn checkbox_regex() -> &'static Regex {
    static CHECKBOX_REGEX: OnceLock<Regex> = OnceLock::new();
    CHECKBOX_REGEX.get_or_init(|| {
        Regex::new(r"^([^\S\r]*)([*+-]|[0-9]+\.) \[(.)\] (.*)$").expect("Invalid checkbox regex")
    })
}

fn list_item_regex() -> &'static Regex {
    static LIST_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
    LIST_ITEM_REGEX.get_or_init(|| {
        Regex::new(r"^([^\S\r]*)([*+-]|[0-9]+\.)([^\S\r]+)(.*)$").expect("Invalid list item regex")
    })
}

fn is_indent_char(c: char) -> bool {
    c.is_whitespace() && c != '\r'
}

/// True for `[]` or `[c]` at the start of `rest`: such a line is a malformed
/// checkbox, not a plain list item.
fn starts_with_bracket_pair(rest: &str) -> bool {
    let mut chars = rest.chars();
    if chars.next() != Some('[') {
        return false;
    }
    match chars.next() {
        Some(']') => true,
        Some(_) => chars.next() == Some(']'),
        None => false,
    }
}

/// Turns raw lines into [`Line`]s. Total: every input yields a line.
///
/// Patterns are tried in order: checkbox, then list item, then plain text.
pub struct LineClassifier<'a> {
    settings: &'a Settings,
}

impl<'a> LineClassifier<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn classify(&self, raw: &str) -> Line {
        if let Some(line) = self.checkbox(raw) {
            return line;
        }
        if let Some(line) = self.list_item(raw) {
            return line;
        }
        self.text(raw)
    }

    fn checkbox(&self, raw: &str) -> Option<Line> {
        let caps = checkbox_regex().captures(raw)?;
        let check_char = caps.get(3)?.as_str().chars().next()?;

        Some(Line::Checkbox(CheckboxLine {
            indent: self.indent(&caps),
            marker: Marker::parse(caps.get(2)?.as_str())?,
            check_char,
            state: self.settings.classify_symbol(check_char),
            text: caps.get(4)?.as_str().to_string(),
        }))
    }

    fn list_item(&self, raw: &str) -> Option<Line> {
        let caps = list_item_regex().captures(raw)?;
        let rest = caps.get(4)?.as_str();
        if starts_with_bracket_pair(rest) {
            return None;
        }

        Some(Line::ListItem(ListItemLine {
            indent: self.indent(&caps),
            marker: Marker::parse(caps.get(2)?.as_str())?,
            gap: caps.get(3)?.as_str().to_string(),
            text: rest.to_string(),
        }))
    }

    fn text(&self, raw: &str) -> Line {
        let text = raw.trim_start_matches(is_indent_char);
        let prefix = &raw[..raw.len() - text.len()];

        Line::Text(TextLine {
            indent: Indent::new(prefix, self.settings.tab_size()),
            text: text.to_string(),
        })
    }

    fn indent(&self, caps: &Captures<'_>) -> Indent {
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        Indent::new(prefix, self.settings.tab_size())
    }
}
