use checkbox_sync_engine::settings::CheckboxState;
use checkbox_sync_engine::{PathFilter, PathFilterError, Settings, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid [sync] settings in {config_path}: {source}")]
    InvalidSettings {
        config_path: PathBuf,
        source: SettingsError,
    },

    #[error("Invalid path_globs in {config_path}: {source}")]
    InvalidPathRules {
        config_path: PathBuf,
        source: PathFilterError,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<PathBuf>,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// The `[sync]` table. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub checked_symbols: Vec<char>,
    pub unchecked_symbols: Vec<char>,
    pub ignore_symbols: Vec<char>,
    pub unknown_symbol_policy: CheckboxState,
    pub enable_automatic_child_state: bool,
    pub enable_automatic_parent_state: bool,
    pub tab_size: usize,
    /// Gitignore-style rules, relative to the notes directory, for documents
    /// that are never synchronized.
    pub path_globs: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for SyncConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            checked_symbols: settings.checked_symbols().to_vec(),
            unchecked_symbols: settings.unchecked_symbols().to_vec(),
            ignore_symbols: settings.ignore_symbols().to_vec(),
            unknown_symbol_policy: settings.unknown_symbol_policy(),
            enable_automatic_child_state: settings.enable_automatic_child_state(),
            enable_automatic_parent_state: settings.enable_automatic_parent_state(),
            tab_size: settings.tab_size(),
            path_globs: Vec::new(),
        }
    }
}

impl SyncConfig {
    pub fn to_settings(&self) -> Result<Settings, SettingsError> {
        Settings::builder()
            .checked_symbols(self.checked_symbols.iter().copied())
            .unchecked_symbols(self.unchecked_symbols.iter().copied())
            .ignore_symbols(self.ignore_symbols.iter().copied())
            .unknown_symbol_policy(self.unknown_symbol_policy)
            .enable_automatic_child_state(self.enable_automatic_child_state)
            .enable_automatic_parent_state(self.enable_automatic_parent_state)
            .tab_size(self.tab_size)
            .build()
    }

    pub fn path_filter(&self) -> Result<PathFilter, PathFilterError> {
        PathFilter::new(&self.path_globs)
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Reject bad settings at load time rather than on first sync
        config
            .sync
            .to_settings()
            .map_err(|source| ConfigError::InvalidSettings {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config
            .sync
            .path_filter()
            .map_err(|source| ConfigError::InvalidPathRules {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded notes path
        config.notes_path = config
            .notes_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/checkbox-sync");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
