//! Approximate `.gitignore` handling.
//!
//! Only the root's own `.gitignore` is read. Patterns are kept as a set and
//! evaluated independently (any match ignores), so negation and ordering are
//! not modelled: a `!pattern` line is just a literal pattern.

#![deny(missing_docs)]

use crate::error::{CodestError, CodestResult};
use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// File name read from each root.
pub const GITIGNORE_FILE: &str = ".gitignore";

#[derive(Debug)]
enum RuleKind {
    /// `name/`: the directory itself or anything below it.
    Directory {
        name: String,
        contents: Option<GlobMatcher>,
    },
    /// Anything else, matched as a shell glob.
    Glob(Option<GlobMatcher>),
}

#[derive(Debug)]
struct Rule {
    raw: String,
    kind: RuleKind,
}

fn compile(pattern: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(pattern).literal_separator(false).build() {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(err) => {
            debug!(%pattern, %err, "gitignore pattern is not a valid glob, matching literally");
            None
        }
    }
}

fn glob_match(matcher: &Option<GlobMatcher>, raw: &str, candidate: &str) -> bool {
    match matcher {
        Some(m) => m.is_match(candidate),
        None => raw == candidate,
    }
}

impl Rule {
    fn new(raw: String) -> Self {
        let kind = match raw.strip_suffix('/') {
            Some(name) => RuleKind::Directory {
                name: name.to_string(),
                contents: compile(&format!("{name}/*")),
            },
            None => RuleKind::Glob(compile(&raw)),
        };
        Self { raw, kind }
    }

    fn matches(&self, rel: &str, parts: &[String]) -> bool {
        match &self.kind {
            RuleKind::Directory { name, contents } => {
                rel == name
                    || parts.iter().any(|p| p == name)
                    || glob_match(contents, &format!("{name}/*"), rel)
            }
            RuleKind::Glob(matcher) => {
                glob_match(matcher, &self.raw, rel)
                    || parts.last().is_some_and(|base| glob_match(matcher, &self.raw, base))
                    || parts.iter().any(|p| glob_match(matcher, &self.raw, p))
            }
        }
    }
}

/// Patterns parsed from one root's `.gitignore`. Immutable once built.
#[derive(Debug)]
pub struct GitignoreRules {
    root: PathBuf,
    rules: Vec<Rule>,
}

impl GitignoreRules {
    /// Rule set with no patterns.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: Vec::new(),
        }
    }

    /// Parse `.gitignore` text scoped to `root`.
    pub fn parse(root: impl Into<PathBuf>, contents: &str) -> Self {
        let patterns: BTreeSet<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.strip_prefix('/').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            root: root.into(),
            rules: patterns.into_iter().map(Rule::new).collect(),
        }
    }

    /// Read `<root>/.gitignore`. A missing file yields an empty set.
    pub fn load(root: &Path) -> CodestResult<Self> {
        let path = root.join(GITIGNORE_FILE);
        if !path.exists() {
            debug!(root = %root.display(), "no .gitignore found");
            return Ok(Self::empty(root));
        }
        let contents =
            fs::read_to_string(&path).map_err(|source| CodestError::Gitignore { path, source })?;
        let rules = Self::parse(root, &contents);
        debug!(root = %root.display(), patterns = rules.len(), "loaded .gitignore");
        Ok(rules)
    }

    /// Like [`GitignoreRules::load`], but an unreadable file degrades to no rules.
    pub fn load_or_empty(root: &Path) -> Self {
        Self::load(root).unwrap_or_else(|err| {
            warn!(%err, "ignoring unreadable .gitignore");
            Self::empty(root)
        })
    }

    /// Root the patterns are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw pattern strings in sorted order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.raw.as_str())
    }

    /// Whether `pattern` was parsed from the file.
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns().any(|p| p == pattern)
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no patterns were loaded.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `path` is excluded by any pattern.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return false;
        }
        let rel = parts.join("/");

        match self.rules.iter().find(|r| r.matches(&rel, &parts)) {
            Some(rule) => {
                debug!(pattern = %rule.raw, path = %path.display(), "ignored by .gitignore");
                true
            }
            None => false,
        }
    }
}
