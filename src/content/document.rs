//! Source document model

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::helpers;

/// Extension of rendered pages
pub const OUTPUT_EXTENSION: &str = "html";

/// A Markdown file discovered under the search root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path as discovered (search root joined with the relative path)
    pub source: PathBuf,

    /// Path relative to the search root
    pub relative: PathBuf,

    /// Last modification time of the source
    pub modified: DateTime<Utc>,
}

impl Document {
    /// Describe a document found under `root`, reading its modification time
    pub fn new<P: AsRef<Path>>(root: &Path, source: P) -> Result<Self> {
        let source = source.as_ref().to_path_buf();
        let modified = modified_time(&source)?;
        let relative = source
            .strip_prefix(root)
            .unwrap_or(&source)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        Ok(Self {
            source,
            relative,
            modified,
        })
    }

    /// Rendered page path: the source with its extension replaced
    pub fn output_path(&self) -> PathBuf {
        self.source.with_extension(OUTPUT_EXTENSION)
    }

    /// Canonical URI: feed link + root-relative path with an `.html` extension
    pub fn uri(&self, base: &str) -> String {
        let relative = self.relative.with_extension(OUTPUT_EXTENSION);
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        helpers::join_url(base, segments.iter().map(String::as_str))
    }

    /// Title derived from the file name, e.g. `my_post.md` -> "My Post"
    pub fn default_title(&self) -> String {
        let stem = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        helpers::title_from_stem(&stem)
    }

    /// Whether the page pass can be skipped: an output exists and is not
    /// older than the source
    pub fn is_up_to_date(&self) -> bool {
        match modified_time(&self.output_path()) {
            Ok(output_modified) => output_modified >= self.modified,
            Err(_) => false,
        }
    }
}

/// Modification time of a file as UTC
pub fn modified_time(path: &Path) -> Result<DateTime<Utc>> {
    let metadata = fs::metadata(path).with_context(|| format!("Failed to stat {:?}", path))?;
    let modified = metadata
        .modified()
        .with_context(|| format!("No modification time for {:?}", path))?;
    Ok(helpers::from_system_time(modified))
}
