//! Document rendering.
//!
//! Turns the collected file list into one text or Markdown document: a
//! header, then each file under a label relative to its root, followed by
//! its contents in a fenced block, a skip marker when it is over the size
//! limit, or an error marker when it cannot be read as text.

#![deny(missing_docs)]

use crate::config::DocumentFormat;
use crate::defaults::markdown_language;
use crate::discover::CollectedFile;
use crate::error::{CodestError, CodestResult};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Files larger than this many kilobytes are skipped unless overridden.
pub const DEFAULT_MAX_FILE_SIZE_KB: u64 = 1000;

/// Output path meaning "write to stdout".
pub const STDOUT_MARKER: &str = "-";

/// Builds the collection document.
#[derive(Debug, Clone)]
pub struct Renderer {
    roots: Vec<PathBuf>,
    max_file_size_kb: u64,
    format: DocumentFormat,
}

impl Renderer {
    /// Renderer labelling files relative to `roots`.
    pub fn new(roots: Vec<PathBuf>, max_file_size_kb: u64, format: DocumentFormat) -> Self {
        Self {
            roots,
            max_file_size_kb,
            format,
        }
    }

    /// Render with the current local time in the header.
    pub fn render(&self, files: &[CollectedFile]) -> String {
        self.render_at(files, Local::now())
    }

    /// Render with an explicit header timestamp.
    pub fn render_at(&self, files: &[CollectedFile], generated_at: DateTime<Local>) -> String {
        Document {
            renderer: self,
            files,
            generated_at,
        }
        .to_string()
    }

    /// Path shown for `path`: relative to the deepest root holding it.
    pub fn label(&self, path: &Path) -> String {
        self.roots
            .iter()
            .filter_map(|root| path.strip_prefix(root).ok().map(|rel| (root, rel)))
            .max_by_key(|(root, _)| root.components().count())
            .map(|(_, rel)| rel.display().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    fn write_header(
        &self,
        out: &mut impl fmt::Write,
        total: usize,
        generated_at: DateTime<Local>,
    ) -> fmt::Result {
        let stamp = generated_at.to_rfc3339();
        match self.format {
            DocumentFormat::Text => {
                writeln!(out, "# Project Source Code Collection")?;
                writeln!(out, "# Generated at: {stamp}")?;
                if let [root] = self.roots.as_slice() {
                    writeln!(out, "# Root directory: {}", root.display())?;
                } else {
                    writeln!(out, "# Target directories:")?;
                    for root in &self.roots {
                        writeln!(out, "#   - {}", root.display())?;
                    }
                }
                writeln!(out, "# Total files found: {total}\n")
            }
            DocumentFormat::Markdown => {
                writeln!(out, "# Project Source Code Collection\n")?;
                writeln!(out, "- Generated at: {stamp}")?;
                if let [root] = self.roots.as_slice() {
                    writeln!(out, "- Root directory: `{}`", root.display())?;
                } else {
                    writeln!(out, "- Target directories:")?;
                    for root in &self.roots {
                        writeln!(out, "  - `{}`", root.display())?;
                    }
                }
                writeln!(out, "- Total files found: {total}\n")
            }
        }
    }

    fn write_file(&self, out: &mut impl fmt::Write, file: &CollectedFile) -> fmt::Result {
        let label = self.label(&file.path);
        debug!(file = %label, "processing file");

        if file.size > self.max_file_size_kb.saturating_mul(1024) {
            warn!(file = %label, size_kb = file.size_kb(), "skipping large file");
            self.write_label(out, &label)?;
            return writeln!(
                out,
                "{}[SKIPPED] File size ({:.1}KB) exceeds limit of {}KB\n",
                self.marker_prefix(),
                file.size_kb(),
                self.max_file_size_kb
            );
        }

        match file.read_to_string() {
            Ok(content) => {
                self.write_label(out, &label)?;
                let fence = fence_for(&content);
                writeln!(out, "{fence}{}", self.language(&file.path))?;
                out.write_str(&content)?;
                writeln!(out, "\n{fence}")
            }
            Err(err) => {
                error!(file = %label, %err, "failed to read file");
                self.write_label(out, &label)?;
                writeln!(
                    out,
                    "{}[ERROR] Failed to read file: {err}\n",
                    self.marker_prefix()
                )
            }
        }
    }

    fn write_label(&self, out: &mut impl fmt::Write, label: &str) -> fmt::Result {
        match self.format {
            DocumentFormat::Text => writeln!(out, "\n### File: {label}"),
            DocumentFormat::Markdown => writeln!(out, "\n## `{label}`\n"),
        }
    }

    fn marker_prefix(&self) -> &'static str {
        match self.format {
            DocumentFormat::Text => "# ",
            DocumentFormat::Markdown => "> ",
        }
    }

    fn language(&self, path: &Path) -> String {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.format {
            DocumentFormat::Text => ext,
            DocumentFormat::Markdown => markdown_language(&format!(".{ext}"))
                .map(str::to_string)
                .unwrap_or(ext),
        }
    }
}

/// One rendering pass over a file list.
struct Document<'a> {
    renderer: &'a Renderer,
    files: &'a [CollectedFile],
    generated_at: DateTime<Local>,
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.renderer
            .write_header(f, self.files.len(), self.generated_at)?;
        for file in self.files {
            self.renderer.write_file(f, file)?;
        }
        Ok(())
    }
}

/// Backtick fence one longer than the longest backtick run in `content`.
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// `source_code_<timestamp>.txt`, or `.md` for Markdown.
pub fn default_output_name(format: DocumentFormat, now: DateTime<Local>) -> PathBuf {
    let ext = match format {
        DocumentFormat::Text => "txt",
        DocumentFormat::Markdown => "md",
    };
    PathBuf::from(format!("source_code_{}.{ext}", now.format("%Y%m%d_%H%M%S")))
}

/// Write `document` to `output`, or to stdout when `output` is `-`.
pub fn write_document(document: &str, output: &Path) -> CodestResult<()> {
    let fail = |source| CodestError::Render {
        path: output.to_path_buf(),
        source,
    };
    if output == Path::new(STDOUT_MARKER) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(document.as_bytes()).map_err(fail)?;
        stdout.flush().map_err(fail)?;
    } else {
        fs::write(output, document).map_err(fail)?;
        info!(output = %output.display(), "output written");
    }
    Ok(())
}
