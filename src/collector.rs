//! Multi-root collection: validate, walk each root, merge.

#![deny(missing_docs)]

use crate::config::IgnoreConfig;
use crate::discover::{CollectedFile, Discover};
use crate::error::{CodestError, CodestResult};
use crate::normalize::PathNormalizer;
use crate::rules::IgnoreRules;
use crate::target::Targets;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Collects source files from one or more roots.
#[derive(Debug)]
pub struct FileCollector {
    targets: Targets,
    excluded: Arc<[PathBuf]>,
    config: Arc<IgnoreConfig>,
}

impl FileCollector {
    /// Collector over `roots`, resolving relative paths against the working directory.
    pub fn new<R, E>(roots: R, excluded: E, config: IgnoreConfig) -> CodestResult<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<Path>,
        E: IntoIterator,
        E::Item: AsRef<Path>,
    {
        let normalizer = PathNormalizer::from_current_dir()
            .map_err(|e| CodestError::configuration(".", e.to_string()))?;
        Self::with_normalizer(&normalizer, roots, excluded, config)
    }

    /// Collector whose relative paths resolve through `normalizer`.
    pub fn with_normalizer<R, E>(
        normalizer: &PathNormalizer,
        roots: R,
        excluded: E,
        config: IgnoreConfig,
    ) -> CodestResult<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<Path>,
        E: IntoIterator,
        E::Item: AsRef<Path>,
    {
        let targets = Targets::resolve(normalizer, roots, excluded)?;
        debug!(roots = ?targets.roots(), excluded = ?targets.excluded(), "resolved targets");
        Ok(Self {
            excluded: targets.excluded().into(),
            targets,
            config: Arc::new(config),
        })
    }

    /// Normalized roots.
    pub fn roots(&self) -> &[PathBuf] {
        self.targets.roots()
    }

    /// Walk every root in turn and merge the results.
    ///
    /// Roots are walked sequentially; the first failing root aborts the run.
    pub fn collect_files(&self) -> CodestResult<Vec<CollectedFile>> {
        debug!(extensions = ?self.config.extensions(), "file extensions to collect");
        let mut per_root = Vec::with_capacity(self.roots().len());
        for root in self.roots() {
            let rules = IgnoreRules::new(root, Arc::clone(&self.config), Arc::clone(&self.excluded));
            per_root.push(Discover::walk_root(Arc::new(rules))?);
        }
        let files = aggregate(per_root);
        info!(count = files.len(), "collected source files");
        Ok(files)
    }
}

/// Union per-root results, one entry per absolute path, sorted by path string.
pub fn aggregate<I>(per_root: I) -> Vec<CollectedFile>
where
    I: IntoIterator<Item = Vec<CollectedFile>>,
{
    let merged: BTreeMap<OsString, CollectedFile> = per_root
        .into_iter()
        .flatten()
        .map(|f| (f.path.clone().into_os_string(), f))
        .collect();
    merged.into_values().collect()
}
