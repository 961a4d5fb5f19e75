//! The per-root ignore predicate.

#![deny(missing_docs)]

use crate::config::IgnoreConfig;
use crate::gitignore::GitignoreRules;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Why a path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Under an explicitly excluded directory.
    ExcludedSubtree,
    /// A path component equals an ignore-directory token.
    DirectoryToken,
    /// The path contains an ignore pattern as a substring.
    Pattern,
    /// Matched a `.gitignore` rule.
    Gitignore,
}

/// Exclusion policy for one root.
///
/// Checks run in a fixed order and the first hit wins: excluded subtrees,
/// directory tokens, substring patterns, then `.gitignore`. Tokens and
/// patterns look only at the part of the path below the root.
#[derive(Debug)]
pub struct IgnoreRules {
    root: PathBuf,
    config: Arc<IgnoreConfig>,
    excluded: Arc<[PathBuf]>,
    gitignore: GitignoreRules,
}

impl IgnoreRules {
    /// Build the policy for `root`, reading its `.gitignore`.
    pub fn new(root: &Path, config: Arc<IgnoreConfig>, excluded: Arc<[PathBuf]>) -> Self {
        Self::with_gitignore(config, excluded, GitignoreRules::load_or_empty(root))
    }

    /// Build the policy around an already parsed `.gitignore`.
    pub fn with_gitignore(
        config: Arc<IgnoreConfig>,
        excluded: Arc<[PathBuf]>,
        gitignore: GitignoreRules,
    ) -> Self {
        Self {
            root: gitignore.root().to_path_buf(),
            config,
            excluded,
            gitignore,
        }
    }

    /// Root this policy is scoped to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rule sets shared across roots.
    pub fn config(&self) -> &IgnoreConfig {
        &self.config
    }

    /// Whether `path` should be left out.
    pub fn should_ignore(&self, path: &Path) -> bool {
        match self.ignore_reason(path) {
            Some(reason) => {
                debug!(?reason, path = %path.display(), "ignoring");
                true
            }
            None => false,
        }
    }

    /// First policy that rejects `path`, if any.
    pub fn ignore_reason(&self, path: &Path) -> Option<IgnoreReason> {
        if self.excluded.iter().any(|ex| path.starts_with(ex)) {
            return Some(IgnoreReason::ExcludedSubtree);
        }

        // relative to the root, not the full path: a root under `/tmp/.tmpXYZ`
        // or `~/build/` must not match its own location
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let tokens = self.config.ignore_dirs();
        let hit_token = rel.components().any(|c| match c {
            Component::Normal(part) => part.to_str().is_some_and(|p| tokens.contains(p)),
            _ => false,
        });
        if hit_token {
            return Some(IgnoreReason::DirectoryToken);
        }

        let rel_str = rel.to_string_lossy();
        if self
            .config
            .ignore_patterns()
            .iter()
            .any(|pat| rel_str.contains(pat.as_str()))
        {
            return Some(IgnoreReason::Pattern);
        }

        if self.gitignore.is_ignored(path) {
            return Some(IgnoreReason::Gitignore);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(config: IgnoreConfig, excluded: &[&str], gitignore: &str) -> IgnoreRules {
        let excluded: Vec<PathBuf> = excluded.iter().map(PathBuf::from).collect();
        IgnoreRules::with_gitignore(
            Arc::new(config),
            excluded.into(),
            GitignoreRules::parse("/proj", gitignore),
        )
    }

    #[test]
    fn builtin_tokens_ignore_components() {
        let r = rules(IgnoreConfig::default(), &[], "");
        for token in crate::defaults::DEFAULT_IGNORE_DIRS {
            let p = Path::new("/proj/src").join(token).join("x.py");
            assert!(r.should_ignore(&p), "{} should be ignored", p.display());
        }
    }

    #[test]
    fn excluded_subtree_wins_first() {
        let r = rules(IgnoreConfig::default(), &["/proj/tests"], "");
        assert_eq!(
            r.ignore_reason(Path::new("/proj/tests/node_modules/a.py")),
            Some(IgnoreReason::ExcludedSubtree)
        );
        assert_eq!(
            r.ignore_reason(Path::new("/proj/tests")),
            Some(IgnoreReason::ExcludedSubtree)
        );
        assert_eq!(r.ignore_reason(Path::new("/proj/tests_util.py")), None);
    }

    #[test]
    fn patterns_are_substrings() {
        let r = rules(IgnoreConfig::default(), &[], "");
        assert_eq!(
            r.ignore_reason(Path::new("/proj/src/mod.pyc")),
            Some(IgnoreReason::Pattern)
        );
        assert_eq!(
            r.ignore_reason(Path::new("/proj/.DS_Store")),
            Some(IgnoreReason::Pattern)
        );
        assert_eq!(r.ignore_reason(Path::new("/proj/src/main.py")), None);
    }

    #[test]
    fn root_location_does_not_count() {
        let r = IgnoreRules::with_gitignore(
            Arc::new(IgnoreConfig::default()),
            Vec::<PathBuf>::new().into(),
            GitignoreRules::empty("/home/me/build/.tmp/proj"),
        );
        assert!(!r.should_ignore(Path::new("/home/me/build/.tmp/proj/src/main.py")));
        assert!(r.should_ignore(Path::new("/home/me/build/.tmp/proj/build/main.py")));
    }

    #[test]
    fn gitignore_checked_last() {
        let cfg = IgnoreConfig::default()
            .with_ignore_dirs(Vec::<String>::new())
            .with_ignore_patterns(Vec::<String>::new());
        let r = rules(cfg, &[], "build/\n*.ignore\n");
        assert_eq!(
            r.ignore_reason(Path::new("/proj/src/build/output.txt")),
            Some(IgnoreReason::Gitignore)
        );
        assert_eq!(
            r.ignore_reason(Path::new("/proj/test.ignore")),
            Some(IgnoreReason::Gitignore)
        );
        assert_eq!(r.ignore_reason(Path::new("/proj/buildtools/a.py")), None);
    }
}
