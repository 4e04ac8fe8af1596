//! Excludes documents from synchronization with gitignore-style rules.
//!
//! Rules are matched against paths relative to the notes root:
//!
//! ```text
//! templates/      # everything below any `templates` directory
//! *.tmp.md        # matching files at any depth
//! !keep.tmp.md    # re-include; the last matching rule wins
//! ```
//!
//! A file inside an excluded directory stays excluded even when a later `!`
//! rule names the file itself, exactly as git treats it.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use relative_path::RelativePath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathFilterError {
    #[error("invalid path rule {rule:?}: {source}")]
    InvalidRule {
        rule: String,
        #[source]
        source: ignore::Error,
    },
    #[error("failed to compile path rules: {0}")]
    Build(#[source] ignore::Error),
}

#[derive(Debug, Clone)]
pub struct PathFilter {
    matcher: Gitignore,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl PathFilter {
    pub fn new<I, S>(rules: I) -> Result<Self, PathFilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new("");
        for rule in rules {
            let rule = rule.as_ref();
            let trimmed = rule.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|source| PathFilterError::InvalidRule {
                    rule: rule.to_string(),
                    source,
                })?;
        }

        let matcher = builder.build().map_err(PathFilterError::Build)?;
        log::debug!("compiled {} path rule(s)", matcher.num_ignores() + matcher.num_whitelists());
        Ok(Self { matcher })
    }

    pub fn allow_all() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// Whether the document at `path` may be synchronized.
    pub fn is_allowed(&self, path: &RelativePath) -> bool {
        if self.matcher.is_empty() {
            return true;
        }

        // Directories first, from the root down.
        let mut ancestor = String::new();
        let components: Vec<&str> = path.iter().collect();
        if let Some((_, dirs)) = components.split_last() {
            for dir in dirs {
                if !ancestor.is_empty() {
                    ancestor.push('/');
                }
                ancestor.push_str(dir);
                if self.matcher.matched(Path::new(&ancestor), true).is_ignore() {
                    log::trace!("{path} excluded by directory {ancestor}");
                    return false;
                }
            }
        }

        !self.matcher.matched(Path::new(path.as_str()), false).is_ignore()
    }
}
