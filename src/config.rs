//! Configuration for codest.
//!
//! Two layers live here: [`IgnoreConfig`], the immutable rule sets handed to
//! every root's ignore predicate, and [`Config`], the optional `.codest.toml`
//! project file the CLI merges its flags into.

#![deny(missing_docs)]

use crate::defaults::{DEFAULT_FILE_EXTENSIONS, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_PATTERNS};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fs, path::Path, path::PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".codest.toml";

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ignore tokens, substring patterns and the extension allowlist.
///
/// Built once and shared read-only by every root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreConfig {
    ignore_dirs: BTreeSet<String>,
    ignore_patterns: BTreeSet<String>,
    extensions: BTreeSet<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: to_set(DEFAULT_IGNORE_DIRS),
            ignore_patterns: to_set(DEFAULT_IGNORE_PATTERNS),
            extensions: to_set(DEFAULT_FILE_EXTENSIONS),
        }
    }
}

impl IgnoreConfig {
    /// Replace the directory-name tokens.
    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the substring patterns.
    pub fn with_ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the extension allowlist.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Directory-name tokens.
    pub fn ignore_dirs(&self) -> &BTreeSet<String> {
        &self.ignore_dirs
    }

    /// Substring patterns.
    pub fn ignore_patterns(&self) -> &BTreeSet<String> {
        &self.ignore_patterns
    }

    /// Extension allowlist.
    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }

    /// Whether `file_name` ends with an allowlisted suffix.
    pub fn is_candidate(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// Output document flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Plain text with backtick fences tagged by raw extension.
    #[default]
    Text,
    /// Markdown with language-tagged fences.
    Markdown,
}

/// Contents of `.codest.toml`. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory-name tokens; built-ins when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_dirs: Option<Vec<String>>,
    /// Substring patterns; built-ins when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,
    /// Extension allowlist; built-ins when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    /// Directories excluded wholesale, relative to the config file.
    pub exclude: Vec<PathBuf>,
    /// Largest file rendered inline, in kilobytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_kb: Option<u64>,
    /// Document format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DocumentFormat>,
}

impl Config {
    /// The file `codest init` writes: built-in lists spelled out.
    pub fn template() -> Self {
        let defaults = IgnoreConfig::default();
        Self {
            ignore_dirs: Some(defaults.ignore_dirs.into_iter().collect()),
            ignore_patterns: Some(defaults.ignore_patterns.into_iter().collect()),
            extensions: Some(defaults.extensions.into_iter().collect()),
            exclude: Vec::new(),
            max_file_size_kb: Some(crate::render::DEFAULT_MAX_FILE_SIZE_KB),
            format: Some(DocumentFormat::Text),
        }
    }

    /// Load `.codest.toml` from `dir` (or its parent if `dir` is a file).
    /// If missing, return defaults.
    pub fn load_or_default(dir: &Path) -> anyhow::Result<Self> {
        let file = Self::file_in(dir);
        if file.exists() {
            let s = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let cfg: Config =
                toml::from_str(&s).with_context(|| format!("parsing {}", file.display()))?;
            tracing::debug!(path = %file.display(), "loaded project config");
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Write the template config to `.codest.toml`.
    pub fn write_default_config_at(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
        let file = Self::file_in(dir);
        if !file.exists() || force {
            let s = toml::to_string_pretty(&Self::template())?;
            fs::write(&file, s).with_context(|| format!("writing {}", file.display()))?;
        }
        Ok(file)
    }

    /// Build the rule sets, falling back to built-ins for missing lists.
    pub fn ignore_config(&self) -> IgnoreConfig {
        let mut cfg = IgnoreConfig::default();
        if let Some(dirs) = &self.ignore_dirs {
            cfg = cfg.with_ignore_dirs(dirs.iter().cloned());
        }
        if let Some(patterns) = &self.ignore_patterns {
            cfg = cfg.with_ignore_patterns(patterns.iter().cloned());
        }
        if let Some(exts) = &self.extensions {
            cfg = cfg.with_extensions(exts.iter().cloned());
        }
        cfg
    }

    fn file_in(dir: &Path) -> PathBuf {
        let base = if dir.is_file() {
            dir.parent().unwrap_or(dir)
        } else {
            dir
        };
        base.join(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_override_stays_empty() {
        let cfg = IgnoreConfig::default().with_ignore_patterns(Vec::<String>::new());
        assert!(cfg.ignore_patterns().is_empty());
        assert!(cfg.ignore_dirs().contains("node_modules"));
    }

    #[test]
    fn candidate_is_suffix_match() {
        let cfg = IgnoreConfig::default().with_extensions([".py", ".tar.gz"]);
        assert!(cfg.is_candidate("main.py"));
        assert!(cfg.is_candidate("bundle.tar.gz"));
        assert!(!cfg.is_candidate("main.pyc"));
        assert!(!cfg.is_candidate("README"));
    }

    #[test]
    fn missing_file_gives_builtins() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        let cfg = Config::load_or_default(tmp.path())?;
        assert_eq!(cfg.ignore_config(), IgnoreConfig::default());
        assert!(cfg.exclude.is_empty());
        Ok(())
    }

    #[test]
    fn partial_file_overrides_only_named_lists() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "extensions = [\".rs\"]\nmax_file_size_kb = 5\nformat = \"markdown\"\n",
        )?;
        let cfg = Config::load_or_default(tmp.path())?;
        let rules = cfg.ignore_config();
        assert_eq!(rules.extensions().len(), 1);
        assert_eq!(rules.ignore_dirs(), IgnoreConfig::default().ignore_dirs());
        assert_eq!(cfg.max_file_size_kb, Some(5));
        assert_eq!(cfg.format, Some(DocumentFormat::Markdown));
        Ok(())
    }

    #[test]
    fn written_template_round_trips() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        let path = Config::write_default_config_at(tmp.path(), false)?;
        let cfg = Config::load_or_default(tmp.path())?;
        assert_eq!(path, tmp.path().join(CONFIG_FILE_NAME));
        assert_eq!(cfg.ignore_config(), IgnoreConfig::default());
        Ok(())
    }
}
