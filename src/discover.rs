//! Directory walking for codest.

#![deny(missing_docs)]

use crate::error::{CodestError, CodestResult};
use crate::rules::IgnoreRules;
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A file that survived every ignore rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Size in bytes at walk time.
    pub size: u64,
}

impl CollectedFile {
    /// Size in kilobytes.
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    /// Read the file as UTF-8 text.
    pub fn read_to_string(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

fn is_dir(dent: &DirEntry) -> bool {
    dent.file_type().is_some_and(|t| t.is_dir())
}

/// Discover struct to keep the walk entry points together.
pub struct Discover();

impl Discover {
    /// Walk `rules.root()` and collect allowlisted files the rules keep.
    ///
    /// Ignored directories are pruned without being read. The first I/O
    /// error aborts the walk.
    pub fn walk_root(rules: Arc<IgnoreRules>) -> CodestResult<Vec<CollectedFile>> {
        let root = rules.root().to_path_buf();
        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(CodestError::configuration(&root, "path is not a directory")),
            Err(_) => return Err(CodestError::configuration(&root, "directory not found")),
        }
        info!(root = %root.display(), "collecting files");

        let fail = |source: ignore::Error| CodestError::Collection {
            root: root.clone(),
            source,
        };

        let prune = Arc::clone(&rules);
        let mut builder = WalkBuilder::new(&root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(None)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |dent| !(is_dir(dent) && prune.should_ignore(dent.path())));

        let mut files = Vec::new();
        for res in builder.build() {
            let dent = res.map_err(fail)?;
            if dent.depth() == 0 {
                continue;
            }
            if is_dir(&dent) {
                debug!(dir = %dent.path().display(), "scanning directory");
                continue;
            }

            let name = dent.file_name().to_string_lossy();
            if !rules.config().is_candidate(&name) {
                continue;
            }
            let path = dent.path();
            if rules.should_ignore(path) {
                continue;
            }
            // symlinks are listed, but only when they lead to a regular file
            let meta = match fs::metadata(path) {
                Ok(meta) => meta,
                Err(err) if dent.path_is_symlink() => {
                    warn!(path = %path.display(), %err, "skipping dangling symlink");
                    continue;
                }
                Err(err) => return Err(fail(err.into())),
            };
            if !meta.is_file() {
                continue;
            }

            debug!(path = %path.display(), "found source file");
            files.push(CollectedFile {
                path: dent.into_path(),
                size: meta.len(),
            });
        }

        info!(root = %root.display(), count = files.len(), "found source files");
        Ok(files)
    }
}
