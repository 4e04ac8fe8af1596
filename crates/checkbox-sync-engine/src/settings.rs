use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbol written when a line becomes checked and no checked symbol is configured.
pub const DEFAULT_CHECKED_SYMBOL: char = 'x';
/// Symbol written when a line becomes unchecked and no unchecked symbol is configured.
pub const DEFAULT_UNCHECKED_SYMBOL: char = ' ';
pub const DEFAULT_TAB_SIZE: usize = 4;
/// Largest accepted tab size. Keeps indent widths far from overflow.
pub const MAX_TAB_SIZE: usize = 16;

/// The interpreted state of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxState {
    Checked,
    Unchecked,
    /// A checkbox that is never mutated and never counts toward its parent.
    Ignore,
    /// Not a checkbox at all (plain list item or text).
    NoCheckbox,
}

impl CheckboxState {
    /// Whether this state counts toward a parent's aggregate.
    pub fn is_relevant(self) -> bool {
        matches!(self, CheckboxState::Checked | CheckboxState::Unchecked)
    }
}

/// Names one of the three configurable symbol lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolSet {
    Checked,
    Unchecked,
    Ignore,
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolSet::Checked => "checked",
            SymbolSet::Unchecked => "unchecked",
            SymbolSet::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("checked symbols must not be empty")]
    EmptyCheckedSymbols,

    #[error("unchecked symbols must not be empty")]
    EmptyUncheckedSymbols,

    #[error("symbol {symbol:?} appears in both the {first} and {second} symbol lists")]
    OverlappingSymbols {
        symbol: char,
        first: SymbolSet,
        second: SymbolSet,
    },

    #[error("unknown symbol policy must be checked, unchecked or ignore, got {0:?}")]
    InvalidUnknownPolicy(CheckboxState),

    #[error("tab size must be at least 1")]
    ZeroTabSize,

    #[error("tab size must be at most {max}, got {tab_size}")]
    TabSizeTooLarge { tab_size: usize, max: usize },
}

/// Immutable, validated configuration shared by every stage of the engine.
///
/// Build one with [`SettingsBuilder`]; the builder rejects overlapping or empty
/// symbol lists so the engine never has to recover from them at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    checked_symbols: Vec<char>,
    unchecked_symbols: Vec<char>,
    ignore_symbols: Vec<char>,
    unknown_symbol_policy: CheckboxState,
    enable_automatic_child_state: bool,
    enable_automatic_parent_state: bool,
    tab_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checked_symbols: vec![DEFAULT_CHECKED_SYMBOL],
            unchecked_symbols: vec![DEFAULT_UNCHECKED_SYMBOL],
            ignore_symbols: Vec::new(),
            unknown_symbol_policy: CheckboxState::Checked,
            enable_automatic_child_state: true,
            enable_automatic_parent_state: true,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    pub fn checked_symbols(&self) -> &[char] {
        &self.checked_symbols
    }

    pub fn unchecked_symbols(&self) -> &[char] {
        &self.unchecked_symbols
    }

    pub fn ignore_symbols(&self) -> &[char] {
        &self.ignore_symbols
    }

    pub fn unknown_symbol_policy(&self) -> CheckboxState {
        self.unknown_symbol_policy
    }

    pub fn enable_automatic_child_state(&self) -> bool {
        self.enable_automatic_child_state
    }

    pub fn enable_automatic_parent_state(&self) -> bool {
        self.enable_automatic_parent_state
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Interprets the character between the brackets of a checkbox.
    pub fn classify_symbol(&self, ch: char) -> CheckboxState {
        if self.checked_symbols.contains(&ch) {
            CheckboxState::Checked
        } else if self.unchecked_symbols.contains(&ch) {
            CheckboxState::Unchecked
        } else if self.ignore_symbols.contains(&ch) {
            CheckboxState::Ignore
        } else {
            self.unknown_symbol_policy
        }
    }

    /// The character written into a checkbox that is set to `state`.
    ///
    /// # Panics
    ///
    /// Panics for [`CheckboxState::NoCheckbox`], and for
    /// [`CheckboxState::Ignore`] when no ignore symbol is configured. The engine
    /// only ever assigns `Checked` or `Unchecked`, so both are programmer errors.
    pub fn symbol_for(&self, state: CheckboxState) -> char {
        match state {
            CheckboxState::Checked => self
                .checked_symbols
                .first()
                .copied()
                .unwrap_or(DEFAULT_CHECKED_SYMBOL),
            CheckboxState::Unchecked => self
                .unchecked_symbols
                .first()
                .copied()
                .unwrap_or(DEFAULT_UNCHECKED_SYMBOL),
            CheckboxState::Ignore => match self.ignore_symbols.first() {
                Some(symbol) => *symbol,
                None => panic!("cannot render an ignored checkbox: no ignore symbol configured"),
            },
            CheckboxState::NoCheckbox => {
                panic!("cannot render a checkbox symbol for a line without a checkbox")
            }
        }
    }
}

/// Collects settings values and validates them into a [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    inner: Settings,
}

impl SettingsBuilder {
    pub fn checked_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.inner.checked_symbols = symbols.into_iter().collect();
        self
    }

    pub fn unchecked_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.inner.unchecked_symbols = symbols.into_iter().collect();
        self
    }

    pub fn ignore_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.inner.ignore_symbols = symbols.into_iter().collect();
        self
    }

    pub fn unknown_symbol_policy(mut self, policy: CheckboxState) -> Self {
        self.inner.unknown_symbol_policy = policy;
        self
    }

    pub fn enable_automatic_child_state(mut self, enabled: bool) -> Self {
        self.inner.enable_automatic_child_state = enabled;
        self
    }

    pub fn enable_automatic_parent_state(mut self, enabled: bool) -> Self {
        self.inner.enable_automatic_parent_state = enabled;
        self
    }

    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.inner.tab_size = tab_size;
        self
    }

    pub fn build(self) -> Result<Settings, SettingsError> {
        let s = self.inner;

        if s.checked_symbols.is_empty() {
            return Err(SettingsError::EmptyCheckedSymbols);
        }
        if s.unchecked_symbols.is_empty() {
            return Err(SettingsError::EmptyUncheckedSymbols);
        }
        if s.unknown_symbol_policy == CheckboxState::NoCheckbox {
            return Err(SettingsError::InvalidUnknownPolicy(s.unknown_symbol_policy));
        }
        if s.tab_size == 0 {
            return Err(SettingsError::ZeroTabSize);
        }
        if s.tab_size > MAX_TAB_SIZE {
            return Err(SettingsError::TabSizeTooLarge {
                tab_size: s.tab_size,
                max: MAX_TAB_SIZE,
            });
        }

        let pairs = [
            (SymbolSet::Checked, &s.checked_symbols, SymbolSet::Unchecked, &s.unchecked_symbols),
            (SymbolSet::Checked, &s.checked_symbols, SymbolSet::Ignore, &s.ignore_symbols),
            (SymbolSet::Unchecked, &s.unchecked_symbols, SymbolSet::Ignore, &s.ignore_symbols),
        ];
        for (first, a, second, b) in pairs {
            if let Some(symbol) = a.iter().find(|c| b.contains(*c)) {
                return Err(SettingsError::OverlappingSymbols {
                    symbol: *symbol,
                    first,
                    second,
                });
            }
        }

        Ok(s)
    }
}
