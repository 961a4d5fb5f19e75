//! Root path normalization.
//!
//! Requested roots are made absolute, deduplicated, and any root nested in
//! another requested root is folded into its ancestor. The working directory
//! is the one exception: it never absorbs the roots below it, so
//! `codest . ./src` scans both as separately labelled roots.

#![deny(missing_docs)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against `cwd` and fold `.` and `..` lexically.
///
/// Symlinks are not resolved.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves and collapses requested roots relative to a fixed working directory.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    cwd: PathBuf,
}

impl PathNormalizer {
    /// Normalizer anchored at `cwd`.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        let cwd = cwd.as_ref();
        Self {
            cwd: absolutize(cwd, cwd),
        }
    }

    /// Normalizer anchored at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The working directory entries are resolved against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Absolute, unique, non-nested roots ordered by path length.
    pub fn normalize<I, P>(&self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let unique: BTreeSet<PathBuf> = paths
            .into_iter()
            .map(|p| absolutize(p.as_ref(), &self.cwd))
            .collect();

        let mut kept: Vec<PathBuf> = unique
            .iter()
            .filter(|candidate| {
                !unique.iter().any(|other| {
                    // cwd keeps its children as independent roots
                    *other != self.cwd && is_strict_descendant(other, candidate)
                })
            })
            .cloned()
            .collect();

        kept.sort_by(|a, b| {
            a.as_os_str()
                .len()
                .cmp(&b.as_os_str().len())
                .then_with(|| a.cmp(b))
        });
        kept
    }

    /// True iff `child` lies strictly below `parent`.
    pub fn is_subdirectory(&self, parent: &Path, child: &Path) -> bool {
        is_strict_descendant(
            &absolutize(parent, &self.cwd),
            &absolutize(child, &self.cwd),
        )
    }
}

fn is_strict_descendant(parent: &Path, child: &Path) -> bool {
    child != parent && child.starts_with(parent)
}

/// True iff `child` is a proper descendant of `parent`.
///
/// Identical paths, unrelated paths, and relative paths when the working
/// directory is unavailable all yield `false`.
pub fn is_subdirectory(parent: impl AsRef<Path>, child: impl AsRef<Path>) -> bool {
    let (parent, child) = (parent.as_ref(), child.as_ref());
    if parent.is_absolute() && child.is_absolute() {
        return is_strict_descendant(&absolutize(parent, parent), &absolutize(child, child));
    }
    match std::env::current_dir() {
        Ok(cwd) => PathNormalizer::new(cwd).is_subdirectory(parent, child),
        Err(_) => false,
    }
}
