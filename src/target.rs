//! Scan targets for codest.

#![deny(missing_docs)]

use crate::error::{CodestError, CodestResult};
use crate::normalize::{PathNormalizer, absolutize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Validated roots and excluded directories, all absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    roots: Vec<PathBuf>,
    excluded: Vec<PathBuf>,
}

fn require_dir(path: &Path) -> CodestResult<()> {
    let meta = fs::metadata(path)
        .map_err(|_| CodestError::configuration(path, "directory not found"))?;
    if !meta.is_dir() {
        return Err(CodestError::configuration(path, "path is not a directory"));
    }
    Ok(())
}

impl Targets {
    /// Validate and normalize the user-provided directories.
    ///
    /// Every root and excluded directory must exist and be a directory.
    /// An excluded directory outside all roots is only warned about.
    pub fn resolve<R, E>(normalizer: &PathNormalizer, roots: R, excluded: E) -> CodestResult<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<Path>,
        E: IntoIterator,
        E::Item: AsRef<Path>,
    {
        let requested: Vec<PathBuf> = roots
            .into_iter()
            .map(|p| absolutize(p.as_ref(), normalizer.cwd()))
            .collect();
        if requested.is_empty() {
            return Err(CodestError::configuration(
                normalizer.cwd(),
                "no directories to scan",
            ));
        }
        for root in &requested {
            require_dir(root)?;
        }
        let roots = normalizer.normalize(&requested);

        let mut excluded: Vec<PathBuf> = excluded
            .into_iter()
            .map(|p| absolutize(p.as_ref(), normalizer.cwd()))
            .collect();
        excluded.sort();
        excluded.dedup();
        for ex in &excluded {
            require_dir(ex)?;
            if !roots.iter().any(|root| ex.starts_with(root)) {
                warn!(excluded = %ex.display(), "excluded directory is outside every root");
            }
        }

        Ok(Self { roots, excluded })
    }

    /// Normalized roots, shortest first.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Excluded directories, sorted.
    pub fn excluded(&self) -> &[PathBuf] {
        &self.excluded
    }
}
